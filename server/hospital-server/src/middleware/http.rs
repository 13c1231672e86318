use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use logger_redacted::redact;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowCredentials, AllowOrigin, CorsLayer};

/// Request timing middleware
pub async fn request_timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let elapsed = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        duration_ms = elapsed.as_millis(),
        status = response.status().as_u16(),
        "Request processed"
    );

    response
}

/// Audit logging middleware
///
/// Credentials in the Authorization header are redacted before logging.
pub async fn audit_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let principal = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map_or_else(|| "anonymous".to_string(), redact);

    tracing::info!(
        method = %method,
        uri = %uri,
        principal = %principal,
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Audit log: Request received"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        principal = %principal,
        status = response.status().as_u16(),
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Audit log: Response sent"
    );

    response
}

/// Create CORS layer for the application
///
/// Exactly one origin is allowed, with credentials. Other origins get no
/// CORS headers at all.
pub fn create_cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    match HeaderValue::from_str(origin) {
        Ok(value) => {
            let allowed = value.clone();
            layer
                .allow_origin(AllowOrigin::list([value]))
                .allow_credentials(AllowCredentials::predicate(move |origin, _| {
                    *origin == allowed
                }))
        }
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid CORS origin; cross-origin requests will be refused");
            layer
        }
    }
}
