pub mod calendar;
pub mod compare;
pub mod events;
pub mod health;
pub mod metrics;
pub mod portfolio;
pub mod rankings;
pub mod screener;
pub mod stocks;
pub mod ws;

use axum::Json;
use serde::Serialize;

/// Envelope shared by every JSON API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    pub fn failed(error: impl ToString) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        })
    }
}

/// Read-path results: a failed hosted-table read is reported in the
/// envelope rather than as a 5xx, so the dashboard can render an empty view.
pub(crate) fn respond<T: Serialize>(result: anyhow::Result<T>, what: &str) -> Json<ApiResponse<T>> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load {what}");
            ApiResponse::failed(e)
        }
    }
}
