//! Shared HTTP plumbing for both services.

use std::net::SocketAddr;

use axum::{routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::utils::shutdown_signal;

/// Which of the two processes is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Service {
    /// Serves the heartbeat.
    Api,
    /// Relays the heartbeat to its own callers.
    App,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Add `/health` and request tracing to a service router.
pub fn with_common_routes(router: Router) -> Router {
    router
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/// Expose `/metrics` backed by an installed Prometheus recorder.
pub fn with_metrics(router: Router, handle: PrometheusHandle) -> Router {
    router.route(
        "/metrics",
        get(move || std::future::ready(handle.render())),
    )
}

/// Bind `0.0.0.0:<port>` and serve until a shutdown signal arrives.
pub async fn serve(router: Router, port: u16, service: Service) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    run(listener, router, service).await
}

/// Serve on an already bound listener until a shutdown signal arrives.
pub async fn run(listener: TcpListener, router: Router, service: Service) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("{} listening on {}", service, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{} stopped", service);
    Ok(())
}
