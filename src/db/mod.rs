pub mod dividend_repo;
pub mod history_repo;
pub mod logo_repo;
pub mod ranking_repo;
pub mod saved_stock_repo;
pub mod similar_repo;
pub mod stock_repo;
pub mod tables;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use tables::{PgTables, TableSource};

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
