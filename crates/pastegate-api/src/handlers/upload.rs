use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, sanitize_filename, validate_file_size};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use pastegate_core::models::{FileKind, FileRecord, FileSummary, WebhookPayload};
use pastegate_core::{tokens, AppError};
use pastegate_storage::keys::extension_of;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub ok: bool,
    pub id: String,
    pub meta: FileSummary,
    /// Per-file password, shown once
    pub password: String,
}

/// Pick a file id not already in use.
pub(crate) async fn allocate_file_id(state: &AppState) -> String {
    loop {
        let id = tokens::new_file_id();
        if state.files.metadata.get(&id).await.is_none() {
            return id;
        }
        tracing::warn!(file_id = %id, "Generated file id already taken, retrying");
    }
}

/// Write content, record metadata and announce the upload.
///
/// Without an original name the record is named `{id}.txt`.
pub(crate) async fn store_upload(
    state: &AppState,
    data: Vec<u8>,
    original_name: Option<String>,
    mime_type: String,
    kind: FileKind,
) -> Result<FileRecord, AppError> {
    let id = allocate_file_id(state).await;
    let original_name = original_name.unwrap_or_else(|| format!("{}.txt", id));
    let size = data.len() as u64;
    let extension = extension_of(&original_name).map(str::to_string);

    let stored_name = state
        .files
        .storage
        .save(data, extension.as_deref())
        .await
        .map_err(|e| AppError::Storage(format!("Failed to save content: {}", e)))?;

    let record = FileRecord::new(
        id,
        original_name,
        stored_name,
        mime_type,
        size,
        kind,
        tokens::new_access_password(),
    );
    state.files.metadata.put(record.clone()).await?;

    tracing::info!(
        file_id = %record.id,
        stored_name = %record.stored_name,
        size_bytes = record.size,
        kind = ?record.kind,
        "Stored upload"
    );
    state.webhooks.notify(WebhookPayload::file_uploaded(&record));

    Ok(record)
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with a single `file` field"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (data, filename, content_type) = extract_multipart_file(multipart).await?;
    validate_file_size(data.len(), state.files.max_upload_size)?;

    let original_name = sanitize_filename(&filename);
    let record = store_upload(
        &state,
        data,
        Some(original_name),
        content_type,
        FileKind::File,
    )
    .await?;

    Ok(Json(UploadResponse {
        ok: true,
        id: record.id.clone(),
        meta: record.summary(),
        password: record.access_password.clone().unwrap_or_default(),
    }))
}
