use sqlx::PgPool;

use crate::models::{symbol_key, DividendHistoryPoint};

/// Dividend, payout ratio and yield history for one symbol, oldest first.
pub async fn get_history(pool: &PgPool, symbol: &str) -> anyhow::Result<Vec<DividendHistoryPoint>> {
    let rows = sqlx::query_as::<_, DividendHistoryPoint>(
        r#"
        SELECT symbol, date, dividend, payout_ratio, dividend_yield
        FROM dividend_history
        WHERE UPPER(symbol) = $1
        ORDER BY date ASC
        "#,
    )
    .bind(symbol_key(symbol))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
