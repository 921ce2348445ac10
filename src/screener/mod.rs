pub mod filter;
pub mod sort;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DebtLevel;

pub use filter::{filter_rows, StockFilterCriteria, RANGE_CEILING, RANGE_FLOOR};
pub use sort::{sort_rows, SortDirection, SortKey, SortSpec};

/// A stock joined with its metrics side-table row. Metric fields are `None`
/// when the side table had no entry for the symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenerRow {
    pub symbol: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub price: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub payout_ratio: Option<Decimal>,
    pub health_score: Option<Decimal>,
    pub debt_level: Option<DebtLevel>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenerQuery {
    #[serde(default)]
    pub criteria: StockFilterCriteria,
    pub sort: Option<SortSpec>,
}

/// Filter, then sort. Recomputed in full on every call.
pub fn run(rows: &[ScreenerRow], query: &ScreenerQuery) -> Vec<ScreenerRow> {
    let mut out = filter_rows(rows, &query.criteria);
    if let Some(spec) = query.sort {
        sort_rows(&mut out, spec);
    }
    out
}
