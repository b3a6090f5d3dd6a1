//! Server and API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use warmth_core::errors::{error_code, ErrorCode, WarmthError};

/// Errors that stop the server itself.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// An error as returned to HTTP callers:
/// `{ "error": message, "code": CODE, "retryable": bool }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR",
            message: message.into(),
            retryable: false,
        }
    }

    pub fn bad_request(field: &str, message: impl std::fmt::Display) -> Self {
        WarmthError::validation(field, message.to_string()).into()
    }
}

impl From<WarmthError> for ApiError {
    fn from(err: WarmthError) -> Self {
        let status = match &err {
            WarmthError::ContactNotFound { .. } => StatusCode::NOT_FOUND,
            WarmthError::Validation { .. } => StatusCode::BAD_REQUEST,
            WarmthError::AlreadyExists { .. } => StatusCode::CONFLICT,
            WarmthError::ConcurrencyConflict { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ if err.error_code() == error_code::DB_BUSY => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: err.error_code(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, error = %self.message, "request failed");
        } else {
            tracing::debug!(code = self.code, error = %self.message, "request rejected");
        }
        let body = json!({
            "error": self.message,
            "code": self.code,
            "retryable": self.retryable,
        });
        (self.status, Json(body)).into_response()
    }
}
