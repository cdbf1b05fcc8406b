//! Request extractors.
//!
//! Both extractors reject with [`ApiError`], so a bad body or a bad id is
//! answered with the usual error envelope instead of axum's plain-text
//! rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::{ApiError, ErrorKind};

/// JSON request body.
///
/// Unlike `axum::Json` this does not look at `Content-Type`. The body is
/// read as bytes and handed to `serde_json`; a decode failure becomes a
/// 400 carrying the decoder's message. A body over the router's
/// `DefaultBodyLimit` is a 413.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::new(ErrorKind::PayloadTooLarge, e.body_text())
                } else {
                    ApiError::validation(e.body_text())
                }
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::validation(e.to_string()))
    }
}

/// Product id taken from the `{id}` path segment.
///
/// Reads the `id` parameter by name, so it also works on routes that
/// capture more than the id (`/products/{id}/{*rest}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::validation("invalid id"))?;

        let raw = params
            .get("id")
            .ok_or_else(|| ApiError::validation("invalid id"))?;

        parse_id(raw).map(ProductId)
    }
}

/// Decimal integer with an optional sign. Negative ids parse and then
/// simply match no row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::validation("invalid id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("007").unwrap(), 7);
        assert_eq!(parse_id("-1").unwrap(), -1);

        for raw in ["", "abc", "4a", "1.5", " 3", "99999999999999999999"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.message, "invalid id", "input {raw:?}");
        }
    }
}
