//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mockify_requests_total` (counter): stub requests by method, tier, status
//! - `mockify_request_duration_seconds` (histogram): stub handler latency
//! - `mockify_index_entries` (gauge): entries per index tier
//! - `mockify_admin_operations_total` (counter): admin calls by operation, outcome
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

/// Record a stub request. `tier` is `none` when nothing matched.
pub fn record_request(method: &str, tier: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "mockify_requests_total",
        "method" => method.to_string(),
        "tier" => tier,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("mockify_request_duration_seconds", "tier" => tier)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_index_size(tier: &'static str, size: usize) {
    metrics::gauge!("mockify_index_entries", "tier" => tier).set(size as f64);
}

pub fn record_admin_operation(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "mockify_admin_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
