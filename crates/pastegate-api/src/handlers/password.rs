use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::auth::PasswordRequest;
use crate::state::AccessState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPasswordResponse {
    pub valid: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordInfoResponse {
    pub expires_at: DateTime<Utc>,
}

/// Check a candidate against the current rotating password.
#[utoipa::path(
    post,
    path = "/api/verify-password",
    tag = "password",
    request_body = PasswordRequest,
    responses(
        (status = 200, description = "Password accepted", body = VerifyPasswordResponse),
        (status = 401, description = "`invalid` or `expired`", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(access, request))]
pub async fn verify_password(
    State(access): State<AccessState>,
    ValidatedJson(request): ValidatedJson<PasswordRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let expires_at = access
        .password
        .verify(&request.password, Utc::now())
        .await?;

    Ok(Json(VerifyPasswordResponse {
        valid: true,
        expires_at,
    }))
}

/// When the current rotating password expires. The value itself is never exposed.
#[utoipa::path(
    get,
    path = "/api/password-info",
    tag = "password",
    responses(
        (status = 200, description = "Expiry of the current password", body = PasswordInfoResponse)
    )
)]
pub async fn password_info(State(access): State<AccessState>) -> impl IntoResponse {
    Json(PasswordInfoResponse {
        expires_at: access.password.expires_at().await,
    })
}
