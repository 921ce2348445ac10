use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiResponse;
use crate::api::ws_types::{DashboardEvent, StockRef};
use crate::errors::AppError;
use crate::models::symbol_key;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Published {
    pub symbol: String,
    pub receivers: usize,
}

/// Ask every connected view to open the detail panel for a stock.
pub async fn open_detail(
    State(state): State<AppState>,
    Json(stock): Json<StockRef>,
) -> Result<Json<ApiResponse<Published>>, AppError> {
    let symbol = symbol_key(&stock.symbol);
    if symbol.is_empty() {
        return Err(AppError::BadRequest("symbol is required".into()));
    }

    let receivers = state.publish(DashboardEvent::OpenDetail(StockRef {
        symbol: symbol.clone(),
        company_name: stock.company_name,
    }));
    Ok(ApiResponse::ok(Published { symbol, receivers }))
}
