use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for `dividend_history`: one point of a historical chart.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DividendHistoryPoint {
    pub symbol: String,
    pub date: NaiveDate,
    pub dividend: Option<Decimal>,
    pub payout_ratio: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
}
