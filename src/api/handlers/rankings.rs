use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{respond, ApiResponse};
use crate::mapper::{ranking_views, RankingView};
use crate::services::loader;
use crate::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<RankingsQuery>,
) -> Json<ApiResponse<Vec<RankingView>>> {
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let (rows, logos) = tokio::join!(loader::latest_rankings(&state, limit), loader::logo_index(&state));
    let result = rows.map(|rows| ranking_views(&rows, &logos, &state.config.fallback_logo_url));
    respond(result, "rankings")
}
