use crate::server::HospitalServer;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// System uptime in seconds
    #[schema(example = 3600)]
    pub uptime: u64,
    /// Individual component checks
    pub checks: BTreeMap<String, String>,
}

/// Liveness plus store health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(server): State<HospitalServer>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();

    let healthy = match &server.db_pool {
        Some(pool) => {
            let ok = pool.is_healthy().await;
            checks.insert(
                "database".to_string(),
                if ok { "healthy" } else { "unhealthy" }.to_string(),
            );
            ok
        }
        None => {
            checks.insert("database".to_string(), "in-memory".to_string());
            true
        }
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "degraded" }.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime: server.started_at.elapsed().as_secs(),
            checks,
        }),
    )
}
