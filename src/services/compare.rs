use futures_util::future::join_all;
use serde::Serialize;

use super::loader;
use crate::errors::AppError;
use crate::models::{symbol_key, DividendHistoryPoint};
use crate::screener::ScreenerRow;
use crate::AppState;

const MIN_SYMBOLS: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct CompareRow {
    pub symbol: String,
    pub logo_url: String,
    pub stock: Option<ScreenerRow>,
    pub latest_history: Option<DividendHistoryPoint>,
}

/// Parse a comma-separated symbol list. Symbols are uppercased and
/// deduplicated in first-seen order; between two and `max` are accepted.
pub fn parse_symbols(raw: &str, max: usize) -> Result<Vec<String>, AppError> {
    let mut symbols: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let key = symbol_key(part);
        if !key.is_empty() && !symbols.contains(&key) {
            symbols.push(key);
        }
    }

    if symbols.len() < MIN_SYMBOLS {
        return Err(AppError::BadRequest(format!(
            "at least {MIN_SYMBOLS} distinct symbols are required"
        )));
    }
    if symbols.len() > max {
        return Err(AppError::BadRequest(format!(
            "at most {max} symbols can be compared, got {}",
            symbols.len()
        )));
    }
    Ok(symbols)
}

/// Side-by-side rows for `symbols`, in the order given. A symbol missing
/// from the stocks table still gets a row with `stock: None`.
pub async fn compare(state: &AppState, symbols: &[String]) -> anyhow::Result<Vec<CompareRow>> {
    let (universe, logos) = tokio::join!(loader::screener_universe(state), loader::logo_index(state));
    let universe = universe?;

    let histories = join_all(symbols.iter().map(|s| loader::dividend_history(state, s))).await;

    let rows = symbols
        .iter()
        .zip(histories)
        .map(|(symbol, history)| {
            let latest_history = match history {
                Ok(points) => points.iter().max_by_key(|p| p.date).cloned(),
                Err(e) => {
                    tracing::debug!(error = %e, symbol = %symbol, "History unavailable for comparison");
                    None
                }
            };
            CompareRow {
                symbol: symbol.clone(),
                logo_url: logos.url_or(symbol, &state.config.fallback_logo_url),
                stock: universe.iter().find(|r| &r.symbol == symbol).cloned(),
                latest_history,
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols_dedups_and_uppercases() {
        let symbols = parse_symbols(" ko, pep ,KO,,t", 5).unwrap();
        assert_eq!(symbols, vec!["KO", "PEP", "T"]);
    }

    #[test]
    fn test_parse_symbols_bounds() {
        assert!(matches!(parse_symbols(" , ", 5), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_symbols("ko,KO", 5), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_symbols("A,B,C", 2), Err(AppError::BadRequest(_))));
        assert_eq!(parse_symbols("A,B", 2).unwrap().len(), 2);
    }
}
