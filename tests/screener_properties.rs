//! Randomized checks of screener filtering and sorting against a plain
//! reference predicate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use divboard::models::DebtLevel;
use divboard::screener::{
    filter_rows, sort_rows, ScreenerRow, SortDirection, SortKey, SortSpec, StockFilterCriteria,
};

const SECTORS: &[&str] = &["Energy", "Utilities", "Technology", "Real Estate"];
const EXCHANGES: &[&str] = &["NYSE", "NASDAQ"];
// Blank needles must behave as if the criterion were unset.
const SYMBOL_NEEDLES: &[&str] = &["s0", "S01", "2", "s03", "  ", "", "ZZ"];

fn maybe_decimal(rng: &mut StdRng, max: i64) -> Option<Decimal> {
    rng.random_bool(0.85)
        .then(|| Decimal::new(rng.random_range(0..max * 10), 1))
}

fn random_rows(rng: &mut StdRng, count: usize) -> Vec<ScreenerRow> {
    (0..count)
        .map(|i| ScreenerRow {
            symbol: format!("S{i:03}"),
            sector: Some(SECTORS[rng.random_range(0..SECTORS.len())].into()),
            exchange: Some(EXCHANGES[rng.random_range(0..EXCHANGES.len())].into()),
            price: maybe_decimal(rng, 500),
            dividend_yield: maybe_decimal(rng, 15),
            payout_ratio: maybe_decimal(rng, 120),
            health_score: maybe_decimal(rng, 100),
            debt_level: match rng.random_range(0..4) {
                0 => None,
                1 => Some(DebtLevel::Low),
                2 => Some(DebtLevel::Moderate),
                _ => Some(DebtLevel::High),
            },
            ..Default::default()
        })
        .collect()
}

fn random_criteria(rng: &mut StdRng) -> StockFilterCriteria {
    StockFilterCriteria {
        symbol: rng
            .random_bool(0.4)
            .then(|| SYMBOL_NEEDLES[rng.random_range(0..SYMBOL_NEEDLES.len())].to_string()),
        sector: rng
            .random_bool(0.4)
            .then(|| SECTORS[rng.random_range(0..SECTORS.len())].to_string()),
        exchange: rng
            .random_bool(0.3)
            .then(|| EXCHANGES[rng.random_range(0..EXCHANGES.len())].to_string()),
        min_yield: rng.random_bool(0.3).then(|| Decimal::from(rng.random_range(0..6))),
        max_yield: rng.random_bool(0.3).then(|| Decimal::from(rng.random_range(4..15))),
        min_payout: rng.random_bool(0.3).then(|| Decimal::from(rng.random_range(0..60))),
        max_payout: rng.random_bool(0.3).then(|| Decimal::from(rng.random_range(40..110))),
        min_health: rng.random_bool(0.3).then(|| Decimal::from(rng.random_range(0..90))),
        debt_concern: rng.random_bool(0.3),
    }
}

fn in_range(value: Option<Decimal>, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let min = min.unwrap_or(Decimal::ZERO);
    let max = max.unwrap_or(Decimal::ONE_HUNDRED);
    value.is_some_and(|v| v >= min && v <= max)
}

fn symbol_matches(symbol: &str, needle: Option<&String>) -> bool {
    match needle.map(|n| n.trim()).filter(|n| !n.is_empty()) {
        None => true,
        Some(n) => symbol.to_lowercase().contains(&n.to_lowercase()),
    }
}

fn reference_match(row: &ScreenerRow, c: &StockFilterCriteria) -> bool {
    symbol_matches(&row.symbol, c.symbol.as_ref())
        && c.sector.as_ref().map_or(true, |s| row.sector.as_ref() == Some(s))
        && c.exchange.as_ref().map_or(true, |e| row.exchange.as_ref() == Some(e))
        && in_range(row.dividend_yield, c.min_yield, c.max_yield)
        && in_range(row.payout_ratio, c.min_payout, c.max_payout)
        && c.min_health.map_or(true, |m| row.health_score.is_some_and(|h| h >= m))
        && (!c.debt_concern || matches!(row.debt_level, Some(DebtLevel::Moderate | DebtLevel::High)))
}

#[test]
fn filter_is_a_conjunction_of_criteria() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..300 {
        let rows = random_rows(&mut rng, 40);
        let criteria = random_criteria(&mut rng);

        let filtered = filter_rows(&rows, &criteria);
        let expected: Vec<ScreenerRow> =
            rows.iter().filter(|r| reference_match(r, &criteria)).cloned().collect();
        assert_eq!(filtered, expected, "criteria: {criteria:?}");
    }
}

#[test]
fn empty_criteria_keep_every_row() {
    let mut rng = StdRng::seed_from_u64(1);
    let rows = random_rows(&mut rng, 25);
    assert_eq!(filter_rows(&rows, &StockFilterCriteria::default()), rows);
}

#[test]
fn sort_is_ordered_and_stable() {
    let keys = [SortKey::Symbol, SortKey::Price, SortKey::DividendYield, SortKey::Sector];
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let rows = random_rows(&mut rng, 30);
        let key = keys[rng.random_range(0..keys.len())];

        let mut asc = rows.clone();
        sort_rows(&mut asc, SortSpec::new(key, SortDirection::Asc));
        for pair in asc.windows(2) {
            let ord = divboard::screener::sort::compare(&pair[0], &pair[1], key);
            assert!(ord.is_le());
            // Ties keep their original relative order; symbols were generated ascending.
            if ord.is_eq() {
                assert!(pair[0].symbol < pair[1].symbol);
            }
        }

        let mut desc = rows.clone();
        sort_rows(&mut desc, SortSpec::new(key, SortDirection::Desc));
        for pair in desc.windows(2) {
            assert!(divboard::screener::sort::compare(&pair[0], &pair[1], key).is_ge());
        }
    }
}

#[test]
fn symbol_sort_is_repeatable_and_reverses_exactly() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..100 {
        let mut rows = random_rows(&mut rng, 30);
        // Shuffle so the input order carries no information.
        for i in (1..rows.len()).rev() {
            rows.swap(i, rng.random_range(0..=i));
        }

        let mut once = rows.clone();
        sort_rows(&mut once, SortSpec::new(SortKey::Symbol, SortDirection::Asc));
        let mut twice = once.clone();
        sort_rows(&mut twice, SortSpec::new(SortKey::Symbol, SortDirection::Asc));
        assert_eq!(once, twice);

        let mut desc = rows.clone();
        sort_rows(&mut desc, SortSpec::new(SortKey::Symbol, SortDirection::Desc));
        desc.reverse();
        assert_eq!(desc, once);
    }
}
