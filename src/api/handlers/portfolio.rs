use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{respond, ApiResponse};
use crate::errors::AppError;
use crate::models::{symbol_key, NewSavedStock, SavedStock, SavedStockUpdate};
use crate::services::portfolio::{self, PortfolioView};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FavoriteBody {
    /// Omit to flip the current flag.
    pub is_favorite: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Json<ApiResponse<PortfolioView>> {
    respond(portfolio::load_portfolio(&state, user_id).await, "portfolio")
}

pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(mut body): Json<NewSavedStock>,
) -> Result<Json<ApiResponse<SavedStock>>, AppError> {
    body.symbol = symbol_key(&body.symbol);
    if body.symbol.is_empty() {
        return Err(AppError::BadRequest("symbol is required".into()));
    }
    if body.quantity.is_sign_negative() {
        return Err(AppError::BadRequest("quantity cannot be negative".into()));
    }

    let saved = portfolio::add_stock(&state, user_id, &body).await?;
    Ok(ApiResponse::ok(saved))
}

pub async fn update(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    Json(body): Json<SavedStockUpdate>,
) -> Result<Json<ApiResponse<SavedStock>>, AppError> {
    if body.quantity.is_some_and(|q| q.is_sign_negative()) {
        return Err(AppError::BadRequest("quantity cannot be negative".into()));
    }

    let updated = portfolio::update_stock(&state, user_id, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("saved stock {id}")))?;
    Ok(ApiResponse::ok(updated))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    if !portfolio::remove_stock(&state, user_id, id).await? {
        return Err(AppError::NotFound(format!("saved stock {id}")));
    }
    Ok(ApiResponse::ok(id))
}

pub async fn favorite(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    body: Option<Json<FavoriteBody>>,
) -> Result<Json<ApiResponse<SavedStock>>, AppError> {
    let favorite = body.and_then(|Json(b)| b.is_favorite);
    let updated = portfolio::set_favorite(&state, user_id, id, favorite)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("saved stock {id}")))?;
    Ok(ApiResponse::ok(updated))
}
