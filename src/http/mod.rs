//! HTTP API and dashboard.
//!
//! Every route reads configuration and probes ports afresh. Success bodies
//! carry `"success": true`; failures are `{"error": message}` with a status
//! code chosen by [`ApiError::status_code`].

mod dashboard;
mod error;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::{ListQuery, PortStatusBody};

use crate::supervisor::Supervisor;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Permissive CORS so browser tools on other local ports can call the API.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the application router.
#[must_use]
pub fn router(supervisor: Arc<Supervisor>) -> Router {
    Router::new()
        .route("/", get(dashboard::page))
        .route(
            "/api/services",
            get(handlers::list_services).post(handlers::add_service),
        )
        .route(
            "/api/services/{port}",
            get(handlers::service_info).delete(handlers::remove_service),
        )
        .route("/api/status/{port}", get(handlers::port_status))
        .route("/api/start/{port}", post(handlers::start_service))
        .route("/api/stop/{port}", post(handlers::stop_service))
        .route("/api/code/{port}", post(handlers::open_in_editor))
        .route("/api/finder/{port}", post(handlers::open_in_file_browser))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(supervisor)
}
