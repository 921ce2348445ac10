pub mod api;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod db;
pub mod errors;
pub mod mapper;
pub mod metrics;
pub mod models;
pub mod screener;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::broadcast;

use crate::api::ws_types::DashboardEvent;
use crate::cache::QueryCache;
use crate::calendar::HolidayCalendar;
use crate::config::AppConfig;
use crate::db::TableSource;
use crate::mapper::LogoIndex;

#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<dyn TableSource>,
    pub config: AppConfig,
    pub cache: Arc<QueryCache>,
    pub events_tx: broadcast::Sender<DashboardEvent>,
    pub holidays: Arc<HolidayCalendar>,
    pub static_logos: Arc<LogoIndex>,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(
        tables: Arc<dyn TableSource>,
        config: AppConfig,
        holidays: HolidayCalendar,
        static_logos: LogoIndex,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_channel_capacity.max(1));
        Self {
            tables,
            cache: Arc::new(QueryCache::new(Duration::from_secs(config.cache_ttl_secs))),
            config,
            events_tx,
            holidays: Arc::new(holidays),
            static_logos: Arc::new(static_logos),
            metrics_handle,
        }
    }

    /// Broadcast an event to every subscriber. Returns how many received it;
    /// zero subscribers is not an error.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        ::metrics::counter!("dashboard_events_total").increment(1);
        match self.events_tx.send(event) {
            Ok(n) => n,
            Err(_) => {
                tracing::debug!("Dashboard event dropped: no subscribers");
                0
            }
        }
    }
}
