use std::sync::OnceLock;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder once per process and register the
/// application metrics. Later calls return the same handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("A global metrics recorder was already installed");
            }

            // Pre-register so the series appear before the first increment.
            counter!("cache_hits_total").absolute(0);
            counter!("cache_misses_total").absolute(0);
            counter!("table_fetch_errors_total").absolute(0);
            counter!("dashboard_events_total").absolute(0);
            counter!("portfolio_mutations_total").absolute(0);
            gauge!("ws_clients").set(0.0);

            handle
        })
        .clone()
}
