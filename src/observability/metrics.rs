//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webhook_requests_total` (counter): requests by method, status
//! - `webhook_request_duration_seconds` (histogram): handler latency
//! - `webhook_files_saved_total` (counter): uploaded files written

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_webhook(method: &str, status: u16, start: Instant) {
    counter!(
        "webhook_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("webhook_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_files_saved(count: usize) {
    counter!("webhook_files_saved_total").increment(count as u64);
}
