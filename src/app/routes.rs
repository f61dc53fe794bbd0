//! App service route definitions.

use axum::{routing::get, Router};

use super::handlers::{index, AppState};
use crate::server::with_common_routes;

/// Create the App service router.
pub fn create_router(state: AppState) -> Router {
    with_common_routes(Router::new().route("/", get(index)).with_state(state))
}
