//! Prometheus metrics for the webhook service.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Prefix for every metric this process emits, so co-hosted services can
/// share one scrape target without collisions.
pub const METRICS_PREFIX: &str = "uplink_webhook_";

/// Route label used when no route pattern matched the request.
pub const UNKNOWN_ROUTE: &str = "unknown_route";

/// Metric names used throughout the application.
pub mod names {
    /// Request latency histogram, labeled by method, route and status code.
    pub const HTTP_REQUEST_DURATION_SECONDS: &str =
        "uplink_webhook_http_request_duration_seconds";
}

/// Initialize the metrics recorder and return the handle the `/metrics`
/// endpoint renders snapshots from.
///
/// Must be called once at startup before any metrics are recorded.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Start the process-level runtime metrics collector (memory, CPU, fds) on a
/// fixed interval. Samples land in the shared recorder under
/// [`METRICS_PREFIX`].
pub fn spawn_process_collector(interval: Duration) {
    let collector = metrics_process::Collector::new(METRICS_PREFIX);
    collector.describe();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            collector.collect();
        }
    });
}
