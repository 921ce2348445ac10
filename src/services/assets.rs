use thiserror::Error;

use crate::calendar::HolidayCalendar;
use crate::mapper::LogoIndex;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read a static asset from a file path or an http(s) URL.
pub async fn load_text(source: &str) -> Result<String, AssetError> {
    if is_url(source) {
        let body = reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?;
        return Ok(body);
    }

    tokio::fs::read_to_string(source)
        .await
        .map_err(|source_err| AssetError::Io {
            path: source.to_string(),
            source: source_err,
        })
}

/// Load the logo CSV. A missing or unreadable source yields an empty index.
pub async fn load_logo_csv(source: Option<&str>) -> LogoIndex {
    let Some(source) = source else {
        return LogoIndex::default();
    };

    match load_text(source).await {
        Ok(text) => {
            let index = LogoIndex::from_csv(&text);
            tracing::info!(source, logos = index.len(), "Loaded logo CSV");
            index
        }
        Err(e) => {
            tracing::warn!(error = %e, source, "Failed to load logo CSV");
            LogoIndex::default()
        }
    }
}

/// Load the holiday list. A missing or unreadable source yields an empty
/// calendar.
pub async fn load_holidays(source: Option<&str>) -> HolidayCalendar {
    let Some(source) = source else {
        return HolidayCalendar::default();
    };

    let parsed = match load_text(source).await {
        Ok(text) => HolidayCalendar::from_json(&text).map_err(AssetError::from),
        Err(e) => Err(e),
    };

    match parsed {
        Ok(holidays) => {
            tracing::info!(source, holidays = holidays.len(), "Loaded holiday calendar");
            holidays
        }
        Err(e) => {
            tracing::warn!(error = %e, source, "Failed to load holiday calendar");
            HolidayCalendar::default()
        }
    }
}
