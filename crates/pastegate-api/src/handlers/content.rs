use crate::error::{ErrorResponse, HttpAppError};
use crate::state::{AppState, FileState};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use futures::StreamExt;
use pastegate_core::{models::FileRecord, AppError};
use std::sync::Arc;

/// Stream the stored bytes of `record` with its content type.
///
/// The body owns the open file; a client disconnect drops it.
pub(crate) async fn content_response(
    files: &FileState,
    record: &FileRecord,
    status: StatusCode,
) -> Result<Response<Body>, HttpAppError> {
    let stream = files.storage.open(&record.stored_name).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, record.mime_type.as_str())
        .header(header::CONTENT_LENGTH, record.size)
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

pub(crate) async fn find_record(files: &FileState, id: &str) -> Result<FileRecord, HttpAppError> {
    files
        .metadata
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound("File not found".to_string()).into())
}

/// Ungated fetch used by the viewer page. Ignores lock state and sessions.
#[utoipa::path(
    get,
    path = "/api/content/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Stored bytes", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id, operation = "content"))]
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = find_record(&state.files, &id).await?;
    content_response(&state.files, &record, StatusCode::OK).await
}
