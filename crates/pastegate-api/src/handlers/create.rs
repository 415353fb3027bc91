use crate::constants::CODE_MIME_TYPE;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::upload::store_upload;
use crate::state::AppState;
use crate::utils::upload::validate_file_size;
use axum::{extract::State, response::IntoResponse, Json};
use pastegate_core::models::FileKind;
use pastegate_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequest {
    pub code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateResponse {
    /// Relative raw URL, `/raw/{id}`
    pub url: String,
    pub id: String,
    pub password: String,
}

/// Store a pasted snippet as a text file.
#[utoipa::path(
    post,
    path = "/api/create",
    tag = "files",
    request_body = CreateRequest,
    responses(
        (status = 200, description = "Snippet stored", body = CreateResponse),
        (status = 400, description = "No code provided", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "create"))]
pub async fn create_code(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let code = request
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::MissingInput("No code provided.".to_string()))?;

    let data = code.into_bytes();
    validate_file_size(data.len(), state.files.max_upload_size)?;

    let record = store_upload(
        &state,
        data,
        None,
        CODE_MIME_TYPE.to_string(),
        FileKind::Code,
    )
    .await?;

    Ok(Json(CreateResponse {
        url: format!("/raw/{}", record.id),
        id: record.id.clone(),
        password: record.access_password.clone().unwrap_or_default(),
    }))
}
