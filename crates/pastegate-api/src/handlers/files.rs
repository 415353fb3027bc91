use crate::error::{ErrorResponse, HttpAppError};
use crate::state::FileState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use pastegate_core::models::FileSummary;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleLockResponse {
    pub ok: bool,
    pub id: String,
    pub locked: bool,
}

/// Every stored file, newest first.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    responses(
        (status = 200, description = "All files", body = Vec<FileSummary>)
    )
)]
#[tracing::instrument(skip(files))]
pub async fn list_files(State(files): State<FileState>) -> impl IntoResponse {
    let summaries: Vec<FileSummary> = files
        .metadata
        .list()
        .await
        .iter()
        .map(FileSummary::from)
        .collect();

    tracing::debug!(count = summaries.len(), "Listed files");
    Json(summaries)
}

#[utoipa::path(
    post,
    path = "/api/toggle-lock/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Lock flipped", body = ToggleLockResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(files), fields(file_id = %id))]
pub async fn toggle_lock(
    State(files): State<FileState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = files.metadata.toggle_lock(&id).await?;
    tracing::info!(locked = record.locked, "Lock toggled");

    Ok(Json(ToggleLockResponse {
        ok: true,
        id: record.id,
        locked: record.locked,
    }))
}
