//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for every failure the repository operations can
//! surface and implements Axum's `IntoResponse` so handlers can return them
//! directly as JSON error bodies.
//!
//! Error mappings:
//! - `RepoNotFound`, `ObjectNotFound` → 404
//! - `NoParentCommit`, `InvalidPath` → 400
//! - `CreationConflict` → 409
//! - `Encoding` → 415
//! - `HistoryUnavailable`, `Git`, `Internal` → 500
//!
//! A non-bare repository is not an error: metadata and tag queries return
//! an empty value instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Commit has no parent: {0}")]
    NoParentCommit(String),

    #[error("File is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("History unavailable: {0}")]
    HistoryUnavailable(String),

    #[error("Repository already exists: {0}")]
    CreationConflict(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::RepoNotFound(_) | AppError::ObjectNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NoParentCommit(_) | AppError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AppError::CreationConflict(_) => StatusCode::CONFLICT,
            AppError::Encoding(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::HistoryUnavailable(_) | AppError::Git(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::RepoNotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ObjectNotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NoParentCommit("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::CreationConflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Encoding("x".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::HistoryUnavailable("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::ObjectNotFound("deadbeef".to_string());
        assert_eq!(err.to_string(), "Object not found: deadbeef");
    }
}
