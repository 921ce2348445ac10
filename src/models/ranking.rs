use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database row for `ranking_snapshots`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankingSnapshot {
    pub symbol: String,
    pub rank: i32,
    pub score: Option<Decimal>,
    pub snapshot_date: NaiveDate,
}
