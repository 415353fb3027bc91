use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::content::{content_response, find_record};
use crate::state::{AccessState, FileState};
use crate::utils::credentials::{bearer_token, TokenQuery};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use pastegate_core::CredentialFailure;

/// Session-checked stream of the stored bytes, independent of `ACCESS_POLICY`.
#[utoipa::path(
    get,
    path = "/stream/{id}",
    tag = "auth",
    params(
        ("id" = String, Path, description = "File ID"),
        ("token" = Option<String>, Query, description = "Session token, if no Authorization header")
    ),
    responses(
        (status = 200, description = "Stored bytes", content_type = "application/octet-stream"),
        (status = 401, description = "Session missing, invalid or expired", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(files, access, query, headers), fields(file_id = %id))]
pub async fn stream_file(
    State(files): State<FileState>,
    State(access): State<AccessState>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpAppError> {
    let token = bearer_token(&headers, &query).ok_or(CredentialFailure::Invalid)?;
    access.sessions.validate(&token, &id, Utc::now()).await?;

    let record = find_record(&files, &id).await?;
    content_response(&files, &record, StatusCode::OK).await
}
