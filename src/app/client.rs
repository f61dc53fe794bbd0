//! Outbound client for the API service's heartbeat.

use std::time::{Duration, Instant};

use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{Result, UpstreamError};
use crate::metrics;

/// HTTP client bound to one heartbeat URL.
#[derive(Debug, Clone)]
pub struct HeartbeatClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Full heartbeat URL.
    url: Url,
    /// Deadline for a whole call.
    timeout: Duration,
}

impl HeartbeatClient {
    /// Create a client for `url` whose calls fail after `timeout`.
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self { http, url, timeout })
    }

    /// Create a client from the upstream settings in config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.heartbeat_url()?, config.api_timeout())
    }

    /// Heartbeat URL this client targets.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Call the heartbeat once and return its body text.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn check(&self) -> std::result::Result<String, UpstreamError> {
        let start = Instant::now();
        let result = self.fetch().await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };
        metrics::record_upstream(outcome, start);
        debug!(outcome, elapsed_ms = start.elapsed().as_millis() as u64, "Heartbeat call finished");

        result
    }

    async fn fetch(&self) -> std::result::Result<String, UpstreamError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::BadStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                UpstreamError::Body(e.to_string())
            }
        })
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            self.timeout_error()
        } else {
            UpstreamError::Unreachable(err.to_string())
        }
    }

    fn timeout_error(&self) -> UpstreamError {
        UpstreamError::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}
