//! Health check handler.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

#[derive(serde::Serialize)]
struct HealthCheckResponse {
    status: String,
    storage: String,
}

/// GET /health: process is up and the storage backend answers.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let storage = state.storage.clone();
    let storage_status = match tokio::time::timeout(
        TIMEOUT,
        storage.exists("health-check-non-existent-key"),
    )
    .await
    {
        Ok(Ok(_)) => "healthy".to_string(),
        Ok(Err(e)) => format!("degraded: {}", e),
        Err(_) => "timeout".to_string(),
    };

    let healthy = storage_status == "healthy";
    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage: storage_status,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
