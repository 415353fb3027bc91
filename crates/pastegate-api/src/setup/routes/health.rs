//! Health check handlers and response types.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub metadata: String,
    pub storage: String,
    pub files: usize,
    pub access_policy: &'static str,
    pub webhooks: &'static str,
}

/// Liveness check: the process is running.
pub async fn liveness_check(_state: Arc<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Metadata snapshot reachable and content store answering.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let metadata = state.files.metadata.clone();
    let metadata_status = run_check(
        TIMEOUT,
        async move {
            match metadata.path().parent().filter(|d| !d.as_os_str().is_empty()) {
                Some(dir) => tokio::fs::metadata(dir).await.map(drop),
                None => Ok(()),
            }
        },
        "unhealthy",
    )
    .await;

    let storage = state.files.storage.clone();
    let storage_status = run_check(
        TIMEOUT,
        async move {
            storage
                .exists("health-check-non-existent-key")
                .await
                .map(drop)
        },
        "degraded",
    )
    .await;

    let overall_healthy = metadata_status == "healthy" && storage_status == "healthy";

    let response = HealthCheckResponse {
        status: if overall_healthy { "healthy" } else { "unhealthy" }.to_string(),
        metadata: metadata_status,
        storage: storage_status,
        files: state.files.metadata.len().await,
        access_policy: state.access.policy.name(),
        webhooks: if state.webhooks.is_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
