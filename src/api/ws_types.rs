use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::detail::{FetchState, StockDetail};

/// Events broadcast to every connected dashboard. Replaces the untyped
/// browser custom events used for cross-panel navigation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum DashboardEvent {
    /// Ask the dashboards to open the detail view for a stock.
    #[serde(rename = "open_detail")]
    OpenDetail(StockRef),

    #[serde(rename = "portfolio_changed")]
    PortfolioChanged(PortfolioChange),

    #[serde(rename = "cache_invalidated")]
    CacheInvalidated(CacheInvalidation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRef {
    pub symbol: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioAction {
    Added,
    Updated,
    Removed,
    FavoriteChanged,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioChange {
    pub user_id: Uuid,
    pub stock_id: Uuid,
    pub action: PortfolioAction,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheInvalidation {
    pub table: String,
    pub entries: usize,
}

/// Messages a dashboard client sends over its WebSocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Load a stock detail on this connection.
    OpenDetail { symbol: String },
    /// Abort every detail load in flight on this connection.
    CancelAll,
}

/// Replies addressed to one connection only.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ConnectionReply {
    #[serde(rename = "detail")]
    Detail(DetailReply),

    #[serde(rename = "error")]
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailReply {
    pub symbol: String,
    pub result: FetchState<Box<StockDetail>>,
}
