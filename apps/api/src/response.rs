//! # Response Envelope
//!
//! Every response body has the same shape:
//!
//! ```json
//! { "code": 200, "message": "success", "data": { ... } }   // success
//! { "code": 404, "message": "product not found" }          // error
//! ```
//!
//! `code` always mirrors the HTTP status. Errors are rendered by
//! [`crate::error::ApiError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    status: StatusCode,

    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_status(status: StatusCode, data: T) -> Self {
        ApiResponse {
            status,
            code: status.as_u16(),
            message: "success".to_string(),
            data,
        }
    }

    /// 200 OK.
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// 201 Created.
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
