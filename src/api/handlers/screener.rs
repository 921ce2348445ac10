use axum::extract::State;
use axum::Json;

use super::{respond, ApiResponse};
use crate::screener::{self, ScreenerQuery, ScreenerRow};
use crate::services::loader;
use crate::AppState;

/// Filter then sort the stock universe. An empty body returns every stock
/// in table order.
pub async fn search(
    State(state): State<AppState>,
    Json(query): Json<ScreenerQuery>,
) -> Json<ApiResponse<Vec<ScreenerRow>>> {
    let result = loader::screener_universe(&state)
        .await
        .map(|rows| screener::run(&rows, &query));
    respond(result, "screener universe")
}
