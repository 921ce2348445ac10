use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{symbol_key, NewSavedStock, SavedStock, SavedStockUpdate};

/// All saved stocks for a user.
pub async fn get_for_user(pool: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<SavedStock>> {
    let rows = sqlx::query_as::<_, SavedStock>(
        "SELECT * FROM saved_stocks WHERE user_id = $1 ORDER BY symbol",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert a saved stock for a user.
pub async fn insert(pool: &PgPool, user_id: Uuid, new: &NewSavedStock) -> anyhow::Result<SavedStock> {
    let row = sqlx::query_as::<_, SavedStock>(
        r#"
        INSERT INTO saved_stocks (user_id, symbol, company_name, quantity, dividend_rate, is_favorite)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(symbol_key(&new.symbol))
    .bind(&new.company_name)
    .bind(new.quantity)
    .bind(new.dividend_rate)
    .bind(new.is_favorite)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Apply a partial update. Returns `None` when the row does not belong to
/// the user or does not exist. Last write wins.
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    update: &SavedStockUpdate,
) -> anyhow::Result<Option<SavedStock>> {
    let row = sqlx::query_as::<_, SavedStock>(
        r#"
        UPDATE saved_stocks
        SET company_name = COALESCE($3, company_name),
            quantity = COALESCE($4, quantity),
            dividend_rate = COALESCE($5, dividend_rate)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&update.company_name)
    .bind(update.quantity)
    .bind(update.dividend_rate)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Delete a saved stock. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM saved_stocks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Set the favorite flag, or flip it when `favorite` is `None`.
pub async fn set_favorite(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    favorite: Option<bool>,
) -> anyhow::Result<Option<SavedStock>> {
    let row = sqlx::query_as::<_, SavedStock>(
        r#"
        UPDATE saved_stocks
        SET is_favorite = COALESCE($3, NOT is_favorite)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(favorite)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
