//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<ApiResponse<T>, ApiError>                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Body undecodable?  ─── serde_json::Error ──────────┐                   │
//! │  Field invalid?     ─── ValidationError ────────────┤                   │
//! │  Id absent?         ─── DbError::NotFound ──────────┼──► ApiError ──►   │
//! │  Storage failed?    ─── DbError::QueryFailed(..) ───┘   {code,message}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers branch on [`ErrorKind`], never on message text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use stockroom_core::ValidationError;
use stockroom_db::DbError;

/// Error returned from HTTP handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": 404,
///   "message": "product not found"
/// }
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Failure class, decides the HTTP status
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,
}

/// Failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input validation failed (400)
    Validation,

    /// Resource not found (404)
    NotFound,

    /// Method not supported on a known path (405)
    MethodNotAllowed,

    /// Request body over the configured limit (413)
    PayloadTooLarge,

    /// Storage or internal failure (500)
    Storage,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    message: &'a str,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Validation, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::NotFound, message)
    }

    pub fn method_not_allowed() -> Self {
        ApiError::new(ErrorKind::MethodNotAllowed, "method not allowed")
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Storage, message)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found("product not found"),
            other => {
                tracing::error!(error = %other, "Storage operation failed");
                ApiError::storage(other.to_string())
            }
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: status.as_u16(),
            message: &self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
