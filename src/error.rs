use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::storage::StorageError;

/// Discriminated error type for the HTTP layer.
///
/// Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl is
/// the single place mapping failures to status codes and JSON bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file was provided")]
    MissingFile,
    #[error("File type not allowed")]
    FileTypeNotAllowed,
    #[error("File is too large (max 10MB)")]
    FileTooLarge,
    #[error("File not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::FileTypeNotAllowed | ApiError::FileTooLarge => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound | ApiError::Storage(StorageError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Storage(StorageError::NotFound(_)) => "File not found".to_string(),
            // Backend detail only leaves the process in debug builds;
            // production bodies stay generic
            ApiError::Storage(e) if cfg!(debug_assertions) => {
                format!("Internal server error: {}", e)
            }
            ApiError::Storage(_) | ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_input_errors_map_to_400() {
        assert_eq!(ApiError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::FileTypeNotAllowed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::FileTooLarge.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_objects_map_to_404() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Storage(StorageError::NotFound("uploads/x".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn backend_failures_map_to_500() {
        let err = ApiError::Storage(StorageError::Backend("credentials expired".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("Internal server error"));
    }

    #[test]
    fn validation_messages_are_specific() {
        assert_eq!(ApiError::FileTooLarge.message(), "File is too large (max 10MB)");
        assert_eq!(ApiError::FileTypeNotAllowed.message(), "File type not allowed");
    }
}
