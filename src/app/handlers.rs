//! App service handlers.

use axum::extract::State;
use tracing::info;

use super::client::HeartbeatClient;
use crate::error::UpstreamError;
use crate::metrics;
use crate::server::Service;

/// Prefix of the App service's greeting; the heartbeat text follows it.
pub const GREETING_PREFIX: &str = "Hello World! API connection is: ";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client for the API service's heartbeat.
    pub client: HeartbeatClient,
}

impl AppState {
    /// Create new app state.
    pub fn new(client: HeartbeatClient) -> Self {
        Self { client }
    }
}

/// Root handler - relays the API heartbeat, or the upstream failure.
pub async fn index(State(state): State<AppState>) -> Result<String, UpstreamError> {
    metrics::inc_requests(Service::App, "/");
    info!("App get");

    let heartbeat = state.client.check().await?;
    Ok(greeting(&heartbeat))
}

/// Compose the App service's response body.
pub fn greeting(heartbeat: &str) -> String {
    format!("{}{}", GREETING_PREFIX, heartbeat)
}
