//! HTTP request handlers.

use axum::{http::StatusCode, Json};

use crate::api::types::HealthResponse;

/// Liveness/readiness probe for orchestration systems.
///
/// GET /healthz
///
/// Registered outside the bearer gate: probes never carry credentials.
pub async fn health_check() -> Json<HealthResponse> {
    tracing::debug!("Received health check request");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fallback for paths no route matches.
///
/// Registered behind the gate so the credential check runs before routing
/// is revealed: unauthenticated probes of unknown paths see the same 401
/// as any other protected path.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
