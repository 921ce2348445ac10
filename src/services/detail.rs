use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::task::JoinSet;

use super::loader;
use crate::mapper::{dividend_views, similar_views, text_or_na, DividendEventView, SimilarCompanyView};
use crate::models::{symbol_key, DividendHistoryPoint};
use crate::screener::ScreenerRow;
use crate::AppState;

/// Lifecycle of one fetch: pending until it settles, then either ready or
/// failed. There is no retry.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FetchState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchState::Pending)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StockDetail {
    pub symbol: String,
    pub company_name: String,
    pub logo_url: String,
    pub stock: Option<ScreenerRow>,
    pub dividends: Vec<DividendEventView>,
    pub next_ex_dividend: Option<NaiveDate>,
    /// Countdown to `next_ex_dividend`, in days.
    pub days_until_ex_dividend: Option<i64>,
    pub similar: Vec<SimilarCompanyView>,
    pub history: Vec<DividendHistoryPoint>,
}

/// Earliest ex-dividend date on or after `today`.
pub fn next_ex_dividend(dividends: &[DividendEventView], today: NaiveDate) -> Option<NaiveDate> {
    dividends
        .iter()
        .filter_map(DividendEventView::ex_dividend_day)
        .filter(|d| *d >= today)
        .min()
}

/// Load everything the detail view shows, concurrently.
///
/// The symbol's dividend events are required; similar companies, history
/// and the screener row are best effort and come back empty on failure.
/// Returns `None` when neither events nor a stock row exist.
pub async fn load_detail(
    state: &AppState,
    symbol: &str,
    today: NaiveDate,
) -> anyhow::Result<Option<StockDetail>> {
    let key = symbol_key(symbol);
    let fallback_logo = state.config.fallback_logo_url.as_str();

    let (events, similar, history, universe, logos) = tokio::join!(
        loader::dividend_events_for_symbol(state, &key),
        loader::similar_companies(state, &key),
        loader::dividend_history(state, &key),
        loader::screener_universe(state),
        loader::logo_index(state),
    );

    let events = events?;
    let stock = universe
        .ok()
        .and_then(|rows| rows.into_iter().find(|r| r.symbol == key));

    if events.is_empty() && stock.is_none() {
        return Ok(None);
    }

    let dividends = dividend_views(&events, &logos, fallback_logo);
    let next_ex = next_ex_dividend(&dividends, today);

    let company_name = stock
        .as_ref()
        .and_then(|s| s.company_name.as_deref())
        .or_else(|| events.iter().find_map(|e| e.company_name.as_deref()));

    Ok(Some(StockDetail {
        company_name: text_or_na(company_name),
        logo_url: logos.url_or(&key, fallback_logo),
        stock,
        next_ex_dividend: next_ex,
        days_until_ex_dividend: next_ex.map(|d| (d - today).num_days()),
        dividends,
        similar: similar
            .map(|s| similar_views(&s, &logos, fallback_logo))
            .unwrap_or_default(),
        history: history.map(|h| h.as_ref().clone()).unwrap_or_default(),
        symbol: key,
    }))
}

type DetailOutcome = (String, anyhow::Result<Option<StockDetail>>);

/// Detail loads owned by one consumer, e.g. a WebSocket connection.
///
/// Dropping the scope aborts every load still in flight, so nothing
/// outlives the consumer that asked for it.
pub struct DetailScope {
    state: AppState,
    tasks: JoinSet<DetailOutcome>,
}

impl DetailScope {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tasks: JoinSet::new(),
        }
    }

    pub fn open(&mut self, symbol: &str) -> String {
        let state = self.state.clone();
        let symbol = symbol_key(symbol);
        let task_symbol = symbol.clone();
        self.tasks.spawn(async move {
            let result = load_detail(&state, &task_symbol, Utc::now().date_naive()).await;
            (task_symbol, result)
        });
        symbol
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.abort_all();
    }

    /// Wait for the next load to settle. Returns `None` once nothing is in
    /// flight. Aborted loads are skipped.
    pub async fn next_settled(&mut self) -> Option<(String, FetchState<Box<StockDetail>>)> {
        loop {
            match self.tasks.join_next().await? {
                Ok((symbol, Ok(Some(detail)))) => return Some((symbol, FetchState::Ready(Box::new(detail)))),
                Ok((symbol, Ok(None))) => {
                    let message = format!("no data for {symbol}");
                    return Some((symbol, FetchState::Failed(message)));
                }
                Ok((symbol, Err(e))) => {
                    tracing::warn!(error = %e, symbol = %symbol, "Detail load failed");
                    return Some((symbol, FetchState::Failed(e.to_string())));
                }
                Err(e) if e.is_cancelled() => continue,
                Err(e) => {
                    tracing::error!(error = %e, "Detail load task panicked");
                    continue;
                }
            }
        }
    }
}
