use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for `saved_stocks`, owned by a hosted auth user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedStock {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    pub company_name: Option<String>,
    pub quantity: Decimal,
    pub dividend_rate: Option<Decimal>,
    pub is_favorite: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a saved stock.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSavedStock {
    pub symbol: String,
    pub company_name: Option<String>,
    #[serde(default)]
    pub quantity: Decimal,
    pub dividend_rate: Option<Decimal>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedStockUpdate {
    pub company_name: Option<String>,
    pub quantity: Option<Decimal>,
    pub dividend_rate: Option<Decimal>,
}
