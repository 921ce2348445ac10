//! Cached reads of the hosted tables. Every read goes through the shared
//! `QueryCache`, so sibling requests for the same rows share one query.

use std::sync::Arc;

use chrono::NaiveDate;
use metrics::counter;
use uuid::Uuid;

use crate::cache::{tables, QueryKey};
use crate::mapper::{screener_rows, LogoIndex};
use crate::models::{
    symbol_key, DateField, DividendEvent, DividendHistoryPoint, RankingSnapshot, SavedStock,
    SimilarCompany, StockMetrics, StockRecord,
};
use crate::screener::ScreenerRow;
use crate::AppState;

fn record_failure(key: &QueryKey, e: &anyhow::Error) {
    counter!("table_fetch_errors_total", "table" => key.table).increment(1);
    tracing::warn!(error = %e, key = %key, "Hosted table query failed");
}

async fn cached<T, F, Fut>(state: &AppState, key: QueryKey, fetch: F) -> anyhow::Result<Arc<T>>
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<T>>,
{
    let result = state.cache.get_or_fetch(key.clone(), fetch).await;
    if let Err(e) = &result {
        record_failure(&key, e);
    }
    result
}

/// Hosted logo table merged over the static CSV. Never fails: when the
/// table cannot be read the CSV alone is used.
pub async fn logo_index(state: &AppState) -> Arc<LogoIndex> {
    let fetched = cached(state, QueryKey::all(tables::COMPANY_LOGOS), || async {
        let rows = state.tables.company_logos().await?;
        Ok::<_, anyhow::Error>(LogoIndex::from_rows(&rows).with_fallback(&state.static_logos))
    })
    .await;

    fetched.unwrap_or_else(|_| Arc::clone(&state.static_logos))
}

pub async fn dividend_events_between(
    state: &AppState,
    field: DateField,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Arc<Vec<DividendEvent>>> {
    let key = QueryKey::new(tables::DIVIDEND_EVENTS, format!("{field}:{from}..{to}"));
    cached(state, key, || state.tables.dividend_events_between(field, from, to)).await
}

pub async fn dividend_events_for_symbol(state: &AppState, symbol: &str) -> anyhow::Result<Arc<Vec<DividendEvent>>> {
    let key = QueryKey::new(tables::DIVIDEND_EVENTS, format!("symbol={}", symbol_key(symbol)));
    cached(state, key, || state.tables.dividend_events_for_symbol(symbol)).await
}

pub async fn similar_companies(state: &AppState, symbol: &str) -> anyhow::Result<Arc<Vec<SimilarCompany>>> {
    let key = QueryKey::new(tables::SIMILAR_COMPANIES, symbol_key(symbol));
    cached(state, key, || state.tables.similar_companies(symbol)).await
}

pub async fn dividend_history(state: &AppState, symbol: &str) -> anyhow::Result<Arc<Vec<DividendHistoryPoint>>> {
    let key = QueryKey::new(tables::DIVIDEND_HISTORY, symbol_key(symbol));
    cached(state, key, || state.tables.dividend_history(symbol)).await
}

pub async fn latest_rankings(state: &AppState, limit: i64) -> anyhow::Result<Arc<Vec<RankingSnapshot>>> {
    let key = QueryKey::new(tables::RANKING_SNAPSHOTS, format!("latest:{limit}"));
    cached(state, key, || state.tables.latest_rankings(limit)).await
}

pub async fn saved_stocks(state: &AppState, user_id: Uuid) -> anyhow::Result<Arc<Vec<SavedStock>>> {
    let key = QueryKey::new(tables::SAVED_STOCKS, user_id.to_string());
    cached(state, key, || state.tables.saved_stocks(user_id)).await
}

async fn stocks(state: &AppState) -> anyhow::Result<Arc<Vec<StockRecord>>> {
    cached(state, QueryKey::all(tables::STOCKS), || state.tables.stocks()).await
}

async fn stock_metrics(state: &AppState) -> anyhow::Result<Arc<Vec<StockMetrics>>> {
    cached(state, QueryKey::all(tables::STOCK_METRICS), || state.tables.stock_metrics()).await
}

/// Stocks joined with their metrics and logos. The two tables are read
/// concurrently; either failing fails the whole universe.
pub async fn screener_universe(state: &AppState) -> anyhow::Result<Vec<ScreenerRow>> {
    let (stocks, metrics, logos) = tokio::join!(stocks(state), stock_metrics(state), logo_index(state));
    Ok(screener_rows(&stocks?, &metrics?, &logos))
}
