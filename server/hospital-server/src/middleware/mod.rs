//! Request middleware and extractors.

pub mod auth_context;
pub mod extractors;
mod http;

pub use auth_context::AuthContext;
pub use extractors::{ApiJson, ApiPath, ApiQuery};
pub use http::{audit_logging_middleware, create_cors_layer, request_timing_middleware};
