//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ecfs_api_requests_total` (counter): API calls by resource, outcome
//! - `ecfs_api_request_duration_seconds` (histogram): API latency by resource
//! - `ecfs_backoff_retries_total` (counter): waits taken by the backoff driver
//! - `ecfs_submissions_total` (counter): web submissions by outcome
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_api_request(resource: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!("ecfs_api_requests_total", "resource" => resource, "outcome" => outcome)
        .increment(1);
    ::metrics::histogram!("ecfs_api_request_duration_seconds", "resource" => resource)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_retry() {
    ::metrics::counter!("ecfs_backoff_retries_total").increment(1);
}

pub fn record_submission(outcome: &'static str) {
    ::metrics::counter!("ecfs_submissions_total", "outcome" => outcome).increment(1);
}
