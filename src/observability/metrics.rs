//! Metrics collection and exposition.
//!
//! # Metrics
//! - `godirect_requests_total` (counter): requests by status
//! - `godirect_request_duration_seconds` (histogram): latency distribution
//! - `godirect_resolutions_total` (counter): resolver outcomes
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until
//!   `init_metrics` installs the Prometheus exporter

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(status: u16, start_time: Instant) {
    ::metrics::counter!("godirect_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("godirect_request_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a resolver outcome: `resolved`, `not_found` or `render_error`.
pub fn record_resolution(outcome: &'static str) {
    ::metrics::counter!("godirect_resolutions_total", "outcome" => outcome).increment(1);
}
