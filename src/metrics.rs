//! Prometheus metrics for request counts and upstream latency.
//!
//! The macros are no-ops until a recorder is installed, so handlers can
//! record unconditionally and tests run without any exporter.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::server::Service;

// === Metric Name Constants ===

/// Handled requests counter metric name.
pub const METRIC_REQUESTS: &str = "requests_total";
/// Heartbeat calls counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Heartbeat call latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_latency_ms";

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_counter!(METRIC_REQUESTS, "Total number of requests handled");
    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total number of heartbeat calls to the API service, by outcome"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Heartbeat call latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the handled requests counter.
pub fn inc_requests(service: Service, route: &'static str) {
    let service: &'static str = service.into();
    counter!(METRIC_REQUESTS, "service" => service, "route" => route).increment(1);
}

/// Record one heartbeat call with its outcome and latency.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    counter!(METRIC_UPSTREAM_REQUESTS, "outcome" => outcome).increment(1);
    histogram!(METRIC_UPSTREAM_LATENCY).record(latency_ms);
}
