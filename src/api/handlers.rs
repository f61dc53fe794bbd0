//! API service handlers.

use tracing::debug;

use crate::metrics;
use crate::server::Service;

/// Body returned by the heartbeat endpoint.
pub const HEARTBEAT_BODY: &str = "OK";

/// Heartbeat handler - always returns 200 with `OK`.
pub async fn heartbeat() -> &'static str {
    metrics::inc_requests(Service::Api, "/heartbeat");
    debug!("Heartbeat requested");
    HEARTBEAT_BODY
}
