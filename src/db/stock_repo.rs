use sqlx::PgPool;

use crate::models::{StockMetrics, StockRecord};

/// The screener universe.
pub async fn get_all_stocks(pool: &PgPool) -> anyhow::Result<Vec<StockRecord>> {
    let stocks = sqlx::query_as::<_, StockRecord>(
        "SELECT symbol, company_name, sector, industry, exchange, price FROM stocks ORDER BY symbol",
    )
    .fetch_all(pool)
    .await?;

    Ok(stocks)
}

/// The metrics side table. Not every stock has a row.
pub async fn get_all_metrics(pool: &PgPool) -> anyhow::Result<Vec<StockMetrics>> {
    let metrics = sqlx::query_as::<_, StockMetrics>(
        "SELECT symbol, dividend_yield, payout_ratio, health_score, debt_level FROM stock_metrics",
    )
    .fetch_all(pool)
    .await?;

    Ok(metrics)
}
