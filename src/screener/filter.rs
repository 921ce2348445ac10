use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ScreenerRow;
use crate::models::DebtLevel;

/// Lower bound used when a range filter only sets its maximum.
pub const RANGE_FLOOR: Decimal = Decimal::ZERO;
/// Upper bound used when a range filter only sets its minimum.
pub const RANGE_CEILING: Decimal = Decimal::ONE_HUNDRED;

/// Screener criteria. Every field is optional; unset fields always pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockFilterCriteria {
    /// Case-insensitive substring of the symbol.
    pub symbol: Option<String>,
    pub sector: Option<String>,
    pub exchange: Option<String>,
    pub min_yield: Option<Decimal>,
    pub max_yield: Option<Decimal>,
    pub min_payout: Option<Decimal>,
    pub max_payout: Option<Decimal>,
    pub min_health: Option<Decimal>,
    /// Only show stocks with a debt concern: Moderate or High. Low-debt
    /// stocks and stocks with no recorded debt level are dropped.
    pub debt_concern: bool,
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn bounds(min: Option<Decimal>, max: Option<Decimal>) -> Option<(Decimal, Decimal)> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some((min.unwrap_or(RANGE_FLOOR), max.unwrap_or(RANGE_CEILING)))
}

fn in_range(value: Option<Decimal>, bounds: Option<(Decimal, Decimal)>) -> bool {
    match bounds {
        None => true,
        Some((lo, hi)) => value.is_some_and(|v| v >= lo && v <= hi),
    }
}

impl StockFilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn yield_bounds(&self) -> Option<(Decimal, Decimal)> {
        bounds(self.min_yield, self.max_yield)
    }

    pub fn payout_bounds(&self) -> Option<(Decimal, Decimal)> {
        bounds(self.min_payout, self.max_payout)
    }

    pub fn matches(&self, row: &ScreenerRow) -> bool {
        if let Some(needle) = non_blank(&self.symbol) {
            if !row.symbol.to_uppercase().contains(&needle.to_uppercase()) {
                return false;
            }
        }

        if let Some(sector) = non_blank(&self.sector) {
            if row.sector.as_deref() != Some(sector) {
                return false;
            }
        }

        if let Some(exchange) = non_blank(&self.exchange) {
            if row.exchange.as_deref() != Some(exchange) {
                return false;
            }
        }

        if !in_range(row.dividend_yield, self.yield_bounds()) {
            return false;
        }

        if !in_range(row.payout_ratio, self.payout_bounds()) {
            return false;
        }

        if let Some(floor) = self.min_health {
            if !row.health_score.is_some_and(|h| h >= floor) {
                return false;
            }
        }

        if self.debt_concern {
            match row.debt_level {
                Some(DebtLevel::Moderate) | Some(DebtLevel::High) => {}
                Some(DebtLevel::Low) | None => return false,
            }
        }

        true
    }
}

pub fn filter_rows(rows: &[ScreenerRow], criteria: &StockFilterCriteria) -> Vec<ScreenerRow> {
    rows.iter().filter(|r| criteria.matches(r)).cloned().collect()
}
