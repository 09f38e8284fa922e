//! File endpoints: upload, list, metadata, download.

use crate::auth::models::UserContext;
use crate::error::HttpAppError;
use crate::services::upload::UploadService;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use pydrop_core::constants::PYTHON_CONTENT_TYPE;
use pydrop_core::models::FileResponse;
use pydrop_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// POST /api/files
///
/// Accepts a multipart form with a single "file" field and returns 201 with
/// the stored file's descriptor.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (data, file_name) = extract_multipart_file(multipart).await?;

    let service = UploadService::new(state.storage.clone(), state.files.clone());
    let stored = service.ingest(&user.user_id, &file_name, data).await?;

    Ok((StatusCode::CREATED, Json(FileResponse::from(stored))))
}

/// GET /api/files
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    user: UserContext,
) -> Result<Json<Vec<FileResponse>>, HttpAppError> {
    let files = state.files.list_by_owner(&user.user_id).await?;
    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<FileResponse>, HttpAppError> {
    let file = state
        .files
        .get(&user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File not found: {}", id)))?;
    Ok(Json(FileResponse::from(file)))
}

/// GET /api/files/{id}/content
///
/// Streams the stored bytes back with the Python content type and the
/// original display name as the download filename.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = state
        .files
        .get(&user.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File not found: {}", id)))?;

    let data = state.storage.download(&file.storage_key).await?;

    let headers = [
        (header::CONTENT_TYPE, PYTHON_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];
    Ok((headers, data))
}
