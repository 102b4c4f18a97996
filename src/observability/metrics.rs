//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by endpoint, status
//! - `gateway_upstream_requests_total` (counter): upstream calls by resource, outcome
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency by resource
//!
//! Recording before `init_metrics` is a no-op, so handlers and tests never
//! need an exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    describe_counter!("gateway_requests_total", "Inbound requests handled");
    describe_counter!("gateway_upstream_requests_total", "Calls made to the SWAPI upstream");
    describe_histogram!(
        "gateway_upstream_duration_seconds",
        "Latency of SWAPI upstream calls"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished inbound request.
pub fn record_request(endpoint: &str, status: u16) {
    counter!(
        "gateway_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a finished upstream call started at `start`.
pub fn record_upstream(resource: &str, outcome: &str, start: Instant) {
    counter!(
        "gateway_upstream_requests_total",
        "resource" => resource.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_upstream_duration_seconds",
        "resource" => resource.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
