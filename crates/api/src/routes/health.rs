//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness check.
///
/// Returns "ok" if the process is serving. Does not touch the store.
pub async fn liveness() -> &'static str {
    "ok"
}

/// Store health check.
///
/// Runs a trivial query; 500 if the store does not answer.
pub async fn store_health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok",
                message: "Server is running and DB is connected",
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, backend = state.store().backend(), "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthStatus {
                    status: "error",
                    message: "DB connection failed",
                }),
            )
        }
    }
}
