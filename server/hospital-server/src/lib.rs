//! Hospital management HTTP API
//!
//! REST endpoints for appointments, prescriptions and the doctor directory,
//! authenticated with HS256 JWTs and authorized per role.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::HospitalServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
///
/// Routes are nested under `server.context_path` when one is configured.
pub fn create_app(server: HospitalServer) -> Router {
    let api = routes::create_routes();
    let router = match server.settings.context_path.as_deref() {
        Some(prefix) if prefix != "/" => Router::new().nest(prefix, api),
        _ => api,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer(&server.settings.cors_origin))
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(from_fn(middleware::audit_logging_middleware)),
        )
        .with_state(server)
}
