use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Database row for `stocks`, the screener universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct StockRecord {
    pub symbol: String,
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub exchange: Option<String>,
    pub price: Option<Decimal>,
}

/// Database row for the `stock_metrics` side table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct StockMetrics {
    pub symbol: String,
    pub dividend_yield: Option<Decimal>,
    pub payout_ratio: Option<Decimal>,
    pub health_score: Option<Decimal>,
    pub debt_level: Option<String>,
}

impl StockMetrics {
    pub fn debt(&self) -> Option<DebtLevel> {
        self.debt_level.as_deref().and_then(DebtLevel::from_db_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtLevel {
    Low,
    Moderate,
    High,
}

impl DebtLevel {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(DebtLevel::Low),
            "moderate" | "medium" => Some(DebtLevel::Moderate),
            "high" => Some(DebtLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for DebtLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtLevel::Low => write!(f, "low"),
            DebtLevel::Moderate => write!(f, "moderate"),
            DebtLevel::High => write!(f, "high"),
        }
    }
}
