//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by route, status
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_upstream_errors_total` (counter): failed upstream fetches
//! - `gateway_internal_errors_total` (counter): requests answered with the
//!   fixed internal-error envelope

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "gateway_requests_total",
                "Total requests handled, by route and status"
            );
            describe_histogram!(
                "gateway_request_duration_seconds",
                "Request latency in seconds, by route"
            );
            describe_counter!(
                "gateway_upstream_errors_total",
                "Upstream fetches that failed at the transport level"
            );
            describe_counter!(
                "gateway_internal_errors_total",
                "Requests answered with the fixed internal-error envelope"
            );
            tracing::info!(address = %addr, "Metrics exporter started");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }
}

/// Record a completed request.
pub fn record_request(route: &'static str, status: u16, started: Instant) {
    counter!(
        "gateway_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "route" => route)
        .record(started.elapsed().as_secs_f64());
}

/// Record an upstream fetch that failed before a response arrived.
pub fn record_upstream_error(route: &'static str) {
    counter!("gateway_upstream_errors_total", "route" => route).increment(1);
}

/// Record a request that ended in the fixed internal-error envelope.
pub fn record_internal_error() {
    counter!("gateway_internal_errors_total").increment(1);
}
