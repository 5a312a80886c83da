pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use services::storage::StorageGateway;

use crate::handlers::files;
use crate::middleware::logging::log_requests;
use crate::services::validate::MAX_UPLOAD_SIZE;

#[derive(Clone)]
pub struct AppState {
    /// Storage gateway, the only component touching the backend
    pub gateway: StorageGateway,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::files::service_info,
        handlers::files::upload_file,
        handlers::files::list_files,
        handlers::files::download_file,
        handlers::files::delete_file,
    ),
    components(schemas(
        dto::file::FileUploadResponse,
        dto::file::UploadedFile,
        dto::file::FileListResponse,
        dto::file::FileInfo,
        dto::file::DeleteFileResponse,
        dto::file::ErrorResponse
    )),
    tags(
        (name = "file", description = "File management API"),
        (name = "meta", description = "Service metadata")
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(files::service_info))
        .route("/upload", axum::routing::post(files::upload_file))
        .route("/files", get(files::list_files))
        .route(
            "/files/*key",
            get(files::download_file).delete(files::delete_file),
        )
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        // Slightly above the upload cap so oversize files reach the
        // validator and get the 400 size message, not a transport 413
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024))
        .with_state(state)
}
