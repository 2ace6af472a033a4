//! HTTP error responses.

use crate::local_service::services::ServiceControlError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to HTTP clients as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceControlError),

    /// The request could not be interpreted.
    #[error("{0}")]
    BadRequest(String),

    /// The dashboard template failed to render.
    #[error("failed to render dashboard: {0}")]
    Template(String),
}

impl ApiError {
    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                ServiceControlError::ServiceNotFound(_) => StatusCode::NOT_FOUND,
                ServiceControlError::AlreadyRunning { .. }
                | ServiceControlError::NothingRunning(_)
                | ServiceControlError::DuplicatePort(_) => StatusCode::CONFLICT,
                ServiceControlError::DirectoryMissing { .. }
                | ServiceControlError::InvalidDescriptor(_) => StatusCode::BAD_REQUEST,
                ServiceControlError::LaunchFailed(_)
                | ServiceControlError::TerminateFailed(_)
                | ServiceControlError::OpenFailed(_)
                | ServiceControlError::ConfigIoFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
