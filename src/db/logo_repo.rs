use sqlx::PgPool;

use crate::models::CompanyLogo;

/// Fetch the full logo table.
pub async fn get_all_logos(pool: &PgPool) -> anyhow::Result<Vec<CompanyLogo>> {
    let logos = sqlx::query_as::<_, CompanyLogo>(
        "SELECT symbol, logo_url FROM company_logos",
    )
    .fetch_all(pool)
    .await?;

    Ok(logos)
}
