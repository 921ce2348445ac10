use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

use crate::models::{symbol_key, CompanyLogo};

/// Logo URL lookup keyed by uppercased symbol.
#[derive(Debug, Clone, Default)]
pub struct LogoIndex {
    by_symbol: HashMap<String, String>,
}

impl LogoIndex {
    pub fn from_rows(rows: &[CompanyLogo]) -> Self {
        let by_symbol = rows
            .iter()
            .filter_map(|r| {
                let url = r.logo_url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
                Some((symbol_key(&r.symbol), url.to_string()))
            })
            .collect();
        Self { by_symbol }
    }

    /// Parse a `symbol,logo_url` CSV. Column positions come from the header
    /// when it names them; otherwise the first two columns are used. Lines
    /// that fail to parse or lack either value are skipped.
    pub fn from_csv(text: &str) -> Self {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let (symbol_col, url_col) = match rdr.headers() {
            Ok(headers) => {
                let find = |names: &[&str]| {
                    headers
                        .iter()
                        .position(|h| names.contains(&h.to_lowercase().as_str()))
                };
                (
                    find(&["symbol", "ticker"]).unwrap_or(0),
                    find(&["logo_url", "logo", "url", "image"]).unwrap_or(1),
                )
            }
            Err(_) => (0, 1),
        };

        let mut by_symbol = HashMap::new();
        let mut skipped = 0usize;
        for record in rdr.records() {
            let Ok(record) = record else {
                skipped += 1;
                continue;
            };
            match (record.get(symbol_col), record.get(url_col)) {
                (Some(symbol), Some(url)) if !symbol.is_empty() && !url.is_empty() => {
                    by_symbol.insert(symbol_key(symbol), url.to_string());
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Skipped malformed logo CSV lines");
        }

        Self { by_symbol }
    }

    /// Fill symbols this index lacks from `fallback`. Existing entries win.
    pub fn with_fallback(mut self, fallback: &LogoIndex) -> Self {
        for (symbol, url) in &fallback.by_symbol {
            self.by_symbol
                .entry(symbol.clone())
                .or_insert_with(|| url.clone());
        }
        self
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(&symbol_key(symbol)).map(String::as_str)
    }

    pub fn url_or(&self, symbol: &str, fallback: &str) -> String {
        self.get(symbol).unwrap_or(fallback).to_string()
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}
