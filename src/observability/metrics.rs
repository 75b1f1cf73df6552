//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define relay metrics (requests, latency, source fetch outcomes)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method, status, route
//! - `relay_request_duration_seconds` (histogram): latency by route
//! - `relay_source_fetch_total` (counter): attempts by source, locator, outcome
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op (tests, CLI)
//! - Labels are low-cardinality: route kind, never the target URL, and
//!   extension methods collapse to `other`

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Label for `method`; extension methods share one value.
pub fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "PATCH" => "PATCH",
        "CONNECT" => "CONNECT",
        "TRACE" => "TRACE",
        _ => "other",
    }
}

/// Record one handled request.
pub fn record_request(method: &Method, status: u16, route: &'static str, start: Instant) {
    counter!(
        "relay_requests_total",
        "method" => method_label(method),
        "status" => status.to_string(),
        "route" => route
    )
    .increment(1);
    histogram!("relay_request_duration_seconds", "route" => route).record(start.elapsed().as_secs_f64());
}

/// Record one source fetch attempt. `locator` is "primary" or "fallback",
/// `outcome` is "hit" or "miss".
pub fn record_source_fetch(source: &str, locator: &'static str, outcome: &'static str) {
    counter!(
        "relay_source_fetch_total",
        "source" => source.to_string(),
        "locator" => locator,
        "outcome" => outcome
    )
    .increment(1);
}
