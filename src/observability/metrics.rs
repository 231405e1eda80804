//! Metrics collection and exposition.
//!
//! # Metrics
//! - `generic_proxy_requests_total` (counter): requests by outcome, status
//! - `generic_proxy_fetch_duration_seconds` (histogram): handler latency by outcome
//! - `generic_proxy_response_bytes` (histogram): size of relayed bodies
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a finished proxy request.
pub fn record_outcome(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "generic_proxy_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("generic_proxy_fetch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of a relayed body.
pub fn record_response_bytes(bytes: usize) {
    metrics::histogram!("generic_proxy_response_bytes").record(bytes as f64);
}
