use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Json, Response},
};
use bytes::Bytes;
use chrono::Utc;
use std::time::Duration;

use crate::{
    dto::file::{
        DeleteFileResponse, ErrorResponse, FileInfo, FileListResponse, FileUploadResponse,
        UploadedFile,
    },
    error::ApiError,
    services::storage::{StorageGateway, UPLOAD_PREFIX},
    services::validate,
    AppState,
};

/// Service metadata route
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata")
    ),
    tag = "meta"
)]
pub async fn service_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": state.config.app.name,
        "version": state.config.app.version,
        "description": "File management API - upload, list, download and delete files",
        "endpoints": {
            "POST /upload": "Upload a file",
            "GET /files": "List files",
            "GET /files/:key": "Download a file (redirect to signed URL)",
            "DELETE /files/:key": "Delete a file"
        }
    }))
}

/// Upload one file from the multipart field named `file`.
///
/// MIME type and size are validated before anything is written to the
/// backend. Other form fields are read and ignored.
#[utoipa::path(
    post,
    path = "/upload",
    responses(
        (status = 200, description = "File uploaded successfully", body = FileUploadResponse),
        (status = 400, description = "No file, disallowed type or too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "file"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileUploadResponse>, ApiError> {
    let mut upload: Option<(String, String, String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") && upload.is_none() {
            let field_name = "file".to_string();
            let original_name = field.file_name().unwrap_or("unknown").to_string();
            let mimetype = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            // A read failure here means the body limit was hit mid-field
            let data = field.bytes().await.map_err(|_| ApiError::FileTooLarge)?;
            upload = Some((field_name, original_name, mimetype, data));
        } else {
            let _ = field.bytes().await;
        }
    }

    let (field_name, original_name, mimetype, data) = upload.ok_or(ApiError::MissingFile)?;
    let size = data.len() as u64;

    validate::validate_upload(&mimetype, data.len())?;

    let key = StorageGateway::generate_key(&field_name, &original_name);
    state.gateway.put(&key, &mimetype, data).await?;

    let url = state.gateway.public_url(&key);
    Ok(Json(FileUploadResponse {
        message: "File uploaded successfully".to_string(),
        file: UploadedFile {
            id: key.clone(),
            original_name,
            filename: key,
            mimetype,
            size,
            upload_date: Utc::now(),
            url,
        },
    }))
}

/// List every object under the upload prefix
#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, description = "Files listed successfully", body = FileListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "file"
)]
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<FileListResponse>, ApiError> {
    let objects = state.gateway.list(UPLOAD_PREFIX).await?;

    let files = objects
        .into_iter()
        .map(|object| {
            let url = state.gateway.public_url(&object.key);
            FileInfo {
                id: object.key.clone(),
                filename: object.key,
                size: object.size,
                upload_date: object.last_modified,
                url,
            }
        })
        .collect();

    Ok(Json(FileListResponse { files }))
}

/// Redirect the client to a time-limited signed URL; the backend serves the
/// bytes, not this service. Keys may contain `/`, hence the wildcard capture.
#[utoipa::path(
    get,
    path = "/files/{key}",
    params(
        ("key" = String, Path, description = "Full object key, may contain slashes")
    ),
    responses(
        (status = 302, description = "Redirect to signed download URL"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "file"
)]
pub async fn download_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    if !state.gateway.exists(&key).await? {
        return Err(ApiError::NotFound);
    }

    let ttl = Duration::from_secs(state.config.storage.signed_url_ttl_secs);
    let download_url = state.gateway.presigned_get_url(&key, ttl).await?;

    // Literal 302, matching the documented contract (axum's Redirect
    // helpers emit 303/307/308)
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, download_url)
        .body(Body::empty())
        .map_err(|e| ApiError::Internal(e.into()))
}

/// Delete one object, after the same existence probe as download
#[utoipa::path(
    delete,
    path = "/files/{key}",
    params(
        ("key" = String, Path, description = "Full object key, may contain slashes")
    ),
    responses(
        (status = 200, description = "File deleted successfully", body = DeleteFileResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "file"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    if !state.gateway.exists(&key).await? {
        return Err(ApiError::NotFound);
    }

    state.gateway.delete(&key).await?;

    Ok(Json(DeleteFileResponse {
        message: "File deleted successfully".to_string(),
    }))
}
