use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::ScreenerRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Symbol,
    Price,
    DividendYield,
    Sector,
    Industry,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Ascending comparison on `key`. Missing values order first.
pub fn compare(a: &ScreenerRow, b: &ScreenerRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Symbol => a.symbol.cmp(&b.symbol),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::DividendYield => a.dividend_yield.cmp(&b.dividend_yield),
        SortKey::Sector => a.sector.cmp(&b.sector),
        SortKey::Industry => a.industry.cmp(&b.industry),
    }
}

/// Stable sort. Rows with equal keys keep their relative order in both
/// directions.
pub fn sort_rows(rows: &mut [ScreenerRow], spec: SortSpec) {
    match spec.direction {
        SortDirection::Asc => rows.sort_by(|a, b| compare(a, b, spec.key)),
        SortDirection::Desc => rows.sort_by(|a, b| compare(b, a, spec.key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(symbol: &str, price: Option<i64>, sector: &str) -> ScreenerRow {
        ScreenerRow {
            symbol: symbol.into(),
            price: price.map(Decimal::from),
            sector: Some(sector.into()),
            ..Default::default()
        }
    }

    fn symbols(rows: &[ScreenerRow]) -> Vec<&str> {
        rows.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_sort_by_price_missing_first() {
        let mut rows = vec![row("KO", Some(60), "A"), row("NA", None, "A"), row("T", Some(20), "A")];
        sort_rows(&mut rows, SortSpec::new(SortKey::Price, SortDirection::Asc));
        assert_eq!(symbols(&rows), vec!["NA", "T", "KO"]);

        sort_rows(&mut rows, SortSpec::new(SortKey::Price, SortDirection::Desc));
        assert_eq!(symbols(&rows), vec!["KO", "T", "NA"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut rows = vec![
            row("KO", None, "Staples"),
            row("XOM", None, "Energy"),
            row("PEP", None, "Staples"),
            row("CVX", None, "Energy"),
        ];
        sort_rows(&mut rows, SortSpec::new(SortKey::Sector, SortDirection::Asc));
        assert_eq!(symbols(&rows), vec!["XOM", "CVX", "KO", "PEP"]);

        sort_rows(&mut rows, SortSpec::new(SortKey::Sector, SortDirection::Desc));
        assert_eq!(symbols(&rows), vec!["KO", "PEP", "XOM", "CVX"]);
    }

    #[test]
    fn test_spec_deserialize_default_direction() {
        let spec: SortSpec = serde_json::from_str(r#"{"key":"dividend_yield"}"#).unwrap();
        assert_eq!(spec, SortSpec::new(SortKey::DividendYield, SortDirection::Asc));
    }
}
