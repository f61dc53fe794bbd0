//! Unified error types for the relay services.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Unified error type for the relay services.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Upstream URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the App service's outbound heartbeat call.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, or another transport error.
    #[error("api unreachable: {0}")]
    Unreachable(String),

    /// No complete response before the deadline.
    #[error("api did not respond within {timeout_ms}ms")]
    Timeout {
        /// Deadline that elapsed.
        timeout_ms: u64,
    },

    /// API answered with a non-2xx status.
    #[error("api returned HTTP {status}")]
    BadStatus {
        /// Status code returned by the API.
        status: u16,
    },

    /// Response body could not be read as text.
    #[error("failed to read api response body: {0}")]
    Body(String),
}

impl UpstreamError {
    /// Status code the App service answers with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Unreachable(_)
            | UpstreamError::BadStatus { .. }
            | UpstreamError::Body(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label used for the `outcome` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Unreachable(_) => "unreachable",
            UpstreamError::Timeout { .. } => "timeout",
            UpstreamError::BadStatus { .. } => "bad_status",
            UpstreamError::Body(_) => "body",
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(status = status.as_u16(), "Heartbeat relay failed: {}", self);
        (status, format!("API connection failed: {}", self)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, RelayError>;
