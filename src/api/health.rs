//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::StorageBackend;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `UP` or `DOWN`
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Configured storage engine
    pub backend: StorageBackend,
    /// Storage backend status, with the failure message when down
    pub storage: String,
}

/// Liveness check polled by external health checkers
#[utoipa::path(
    get,
    path = "/api/recommend/healthcheck",
    tag = "health",
    responses(
        (status = 200, description = "Health is OK", body = String, content_type = "text/plain")
    )
)]
pub async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check (pings book storage)
#[utoipa::path(
    get,
    path = "/actuator/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<crate::AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, storage) = match state.services.books.storage_ready().await {
        Ok(()) => (StatusCode::OK, "UP", "available".to_string()),
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "DOWN", e.to_string())
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend: state.config.database.backend,
            storage,
        }),
    )
}
