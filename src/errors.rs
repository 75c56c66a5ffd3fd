use crate::services::bookmark_repository::RepositoryError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

pub const BOOKMARK_NOT_FOUND: &str = "Bookmark doesn't exist";

/// Message sent to clients in place of any 5xx detail.
const SERVER_ERROR: &str = "server error";

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// The 404 shared by every route addressing a single bookmark.
    pub fn bookmark_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, BOOKMARK_NOT_FOUND)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", self.message);
            SERVER_ERROR.to_string()
        } else {
            self.message
        };

        let body = Json(json!({
            "error": { "message": message }
        }));

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(format!("{:#}", err))
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => AppError::bookmark_not_found(),
            other => AppError::internal(other.to_string()),
        }
    }
}

/// Malformed or mistyped JSON is a plain 400; other rejections (413, ...)
/// keep their own status.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                AppError::bad_request(rejection.body_text())
            }
            other => AppError::new(other.status(), other.body_text()),
        }
    }
}
