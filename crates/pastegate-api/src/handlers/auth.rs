use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::{AccessState, FileState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use pastegate_core::CredentialFailure;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Exchange a file's access password for a session token bound to that file.
#[utoipa::path(
    post,
    path = "/auth/{id}",
    tag = "auth",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    request_body = PasswordRequest,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 401, description = "Wrong password or unknown file", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(files, access, request), fields(file_id = %id))]
pub async fn authenticate(
    State(files): State<FileState>,
    State(access): State<AccessState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<PasswordRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Unknown ids are indistinguishable from a wrong password.
    let authorized = files
        .metadata
        .get(&id)
        .await
        .is_some_and(|record| record.access_password_matches(&request.password));

    if !authorized {
        tracing::debug!("Session request rejected");
        return Err(CredentialFailure::Invalid.into());
    }

    let session = access.sessions.issue(&id, Utc::now()).await;
    tracing::info!(expires_at = %session.expires_at, "Session issued");

    Ok(Json(SessionResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}
