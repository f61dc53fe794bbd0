//! API service: answers `GET /heartbeat` with `OK`.

pub mod handlers;
pub mod routes;

pub use handlers::HEARTBEAT_BODY;
pub use routes::create_router;
