use crate::constants::INVALID_RAW_ID;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::content::content_response;
use crate::state::AppState;
use crate::utils::credentials::{extract_credentials, TokenQuery};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use pastegate_core::models::FileRecord;
use pastegate_core::{AppError, Decision, Denial, DenialBody};
use serde_json::json;
use std::sync::Arc;

/// Gated fetch of the raw bytes.
///
/// The configured policy decides. A lock side effect requested by the policy is
/// persisted before the response is rendered.
#[utoipa::path(
    get,
    path = "/api/raw/{id}",
    tag = "raw",
    params(
        ("id" = String, Path, description = "File ID"),
        ("token" = Option<String>, Query, description = "Session token, if no Authorization header")
    ),
    responses(
        (status = 200, description = "Stored bytes, or the user-agent denial text", content_type = "application/octet-stream"),
        (status = 401, description = "Session missing, invalid or expired", body = ErrorResponse),
        (status = 403, description = "Denied by the access policy"),
        (status = 404, description = "Invalid raw id", content_type = "text/plain")
    )
)]
#[tracing::instrument(skip(state, headers, query), fields(file_id = %id, operation = "raw"))]
pub async fn get_raw(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<Response<Body>, HttpAppError> {
    let Some(mut record) = state.files.metadata.get(&id).await else {
        tracing::debug!("Raw fetch for unknown id");
        return Ok(invalid_raw_id());
    };

    let credentials = extract_credentials(&headers, &query);
    let policy = &state.access.policy;
    let decision = policy.evaluate(&record, &credentials, Utc::now()).await;

    if let Some(locked) = policy.lock_effect(&record, &decision) {
        record = state.files.metadata.set_locked(&record.id, locked).await?;
    }

    match decision {
        Decision::Allow => content_response(&state.files, &record, StatusCode::OK).await,
        Decision::Deny { reason } => {
            tracing::info!(
                policy = policy.name(),
                reason = ?reason,
                user_agent = %credentials.user_agent,
                "Raw fetch denied"
            );
            render_denial(&state, &record, policy.denial(reason)).await
        }
    }
}

fn invalid_raw_id() -> Response<Body> {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        INVALID_RAW_ID,
    )
        .into_response()
}

async fn render_denial(
    state: &AppState,
    record: &FileRecord,
    denial: Denial,
) -> Result<Response<Body>, HttpAppError> {
    let status = StatusCode::from_u16(denial.status)
        .map_err(|e| AppError::Internal(format!("Invalid denial status: {}", e)))?;

    let response = match denial.body {
        DenialBody::Text(text) => (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        DenialBody::Html(html) => (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        DenialBody::Error(tag) => (status, Json(json!({ "error": tag }))).into_response(),
        DenialBody::RealContent => return content_response(&state.files, record, status).await,
    };

    Ok(response)
}
