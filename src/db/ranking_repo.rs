use sqlx::PgPool;

use crate::models::RankingSnapshot;

/// Rows of the most recent ranking snapshot, best rank first.
pub async fn get_latest_rankings(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<RankingSnapshot>> {
    let rows = sqlx::query_as::<_, RankingSnapshot>(
        r#"
        SELECT symbol, rank, score, snapshot_date
        FROM ranking_snapshots
        WHERE snapshot_date = (SELECT MAX(snapshot_date) FROM ranking_snapshots)
        ORDER BY rank ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
