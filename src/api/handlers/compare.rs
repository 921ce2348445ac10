use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::{respond, ApiResponse};
use crate::errors::AppError;
use crate::services::compare::{self, CompareRow};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub symbols: String,
}

pub async fn compare(
    State(state): State<AppState>,
    Query(q): Query<CompareQuery>,
) -> Result<Json<ApiResponse<Vec<CompareRow>>>, AppError> {
    let symbols = compare::parse_symbols(&q.symbols, state.config.max_compare_symbols)?;
    Ok(respond(compare::compare(&state, &symbols).await, "comparison"))
}
