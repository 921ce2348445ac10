use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use super::{respond, ApiResponse};
use crate::errors::AppError;
use crate::mapper::{similar_views, SimilarCompanyView};
use crate::models::DividendHistoryPoint;
use crate::services::detail::{self, StockDetail};
use crate::services::loader;
use crate::AppState;

/// A symbol with neither events nor a stock row is a 404. A failed read
/// comes back in the envelope like every other read.
pub async fn detail(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockDetail>>, AppError> {
    match detail::load_detail(&state, &symbol, Utc::now().date_naive()).await {
        Ok(Some(detail)) => Ok(ApiResponse::ok(detail)),
        Ok(None) => Err(AppError::NotFound(format!("no data for symbol {symbol}"))),
        Err(e) => {
            tracing::warn!(error = %e, symbol = %symbol, "Failed to load stock detail");
            Ok(ApiResponse::failed(e))
        }
    }
}

pub async fn similar(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<ApiResponse<Vec<SimilarCompanyView>>> {
    let (rows, logos) = tokio::join!(
        loader::similar_companies(&state, &symbol),
        loader::logo_index(&state),
    );
    let result = rows.map(|rows| similar_views(&rows, &logos, &state.config.fallback_logo_url));
    respond(result, "similar companies")
}

pub async fn history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<ApiResponse<Vec<DividendHistoryPoint>>> {
    let result = loader::dividend_history(&state, &symbol)
        .await
        .map(|points| {
            let mut points = points.as_ref().clone();
            points.sort_by_key(|p| p.date);
            points
        });
    respond(result, "dividend history")
}
