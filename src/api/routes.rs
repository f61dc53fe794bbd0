//! API service route definitions.

use axum::{routing::get, Router};

use super::handlers::heartbeat;
use crate::server::with_common_routes;

/// Create the API service router.
pub fn create_router() -> Router {
    with_common_routes(Router::new().route("/heartbeat", get(heartbeat)))
}
