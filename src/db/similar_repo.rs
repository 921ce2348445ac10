use sqlx::PgPool;

use crate::models::{symbol_key, SimilarCompany};

/// Companies listed as similar to `symbol`.
pub async fn get_similar(pool: &PgPool, symbol: &str) -> anyhow::Result<Vec<SimilarCompany>> {
    let rows = sqlx::query_as::<_, SimilarCompany>(
        r#"
        SELECT symbol, similar_symbol, company_name, revenue_estimate, dividend_yield, risk
        FROM similar_companies
        WHERE UPPER(symbol) = $1
        ORDER BY similar_symbol
        "#,
    )
    .bind(symbol_key(symbol))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
