//! App service: answers `GET /` by relaying the API service's heartbeat.
//!
//! Each request makes exactly one outbound call, bounded by the configured
//! deadline. Failures surface as 502 (unreachable, non-2xx, unreadable body)
//! or 504 (deadline elapsed) with a plain-text reason.

pub mod client;
pub mod handlers;
pub mod routes;

pub use client::HeartbeatClient;
pub use handlers::{greeting, AppState, GREETING_PREFIX};
pub use routes::create_router;
