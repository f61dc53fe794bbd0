//! Heartbeat relay services.
//!
//! Two small HTTP processes that check each other's liveness:
//!
//! ```text
//! client ──GET /──▶ App ──GET /heartbeat──▶ API
//!        ◀─────────      ◀──── "OK" ───────
//!   "Hello World! API connection is: OK"
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and the upstream failure contract
//! - [`api`]: The API service (`/heartbeat`)
//! - [`app`]: The App service (`/`) and its heartbeat client
//! - [`server`]: Shared routes, tracing layer, and serve loop
//! - [`metrics`]: Prometheus counters and latency histogram
//! - [`delay`]: Start-up delay utility
//! - [`utils`]: Utility functions

pub mod api;
pub mod app;
pub mod config;
pub mod delay;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{RelayError, Result, UpstreamError};
pub use server::Service;
