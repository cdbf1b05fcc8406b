//! # HTTP Handlers
//!
//! ```text
//! handlers/
//! ├── mod.rs      ◄─── You are here (exports, fallbacks)
//! ├── health.rs   ◄─── Liveness probe
//! └── product.rs  ◄─── Product CRUD, search, bulk create
//! ```
//!
//! ## How Handlers Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Flow                                         │
//! │                                                                         │
//! │  PATCH /products/7  {"price": 123.45}                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Router ── no path match ──► route_not_found (404)                      │
//! │         │── bad id, any method ──► 400 "invalid id"                    │
//! │         │── no method match ──► method_not_allowed (405)               │
//! │         ▼                                                               │
//! │  async fn patch(                                                        │
//! │      State(state): State<AppState>,   ◄── Database handle              │
//! │      ProductId(id): ProductId,        ◄── 400 "invalid id"             │
//! │      JsonBody(payload): JsonBody<..>, ◄── 400 decoder message          │
//! │  ) -> ApiResult<ApiResponse<Product>>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  {"code":200,"message":"success","data":{...}}                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod health;
pub mod product;

use crate::error::ApiError;
use crate::extract::ProductId;

/// Fallback for paths no route matches.
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("route not found")
}

/// Fallback for a known path called with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Method fallback for `/products/{id}`.
///
/// The id is extracted first, so `POST /products/abc` is a 400 "invalid id"
/// and only a well-formed id gets the 405.
pub async fn product_method_not_allowed(ProductId(_): ProductId) -> ApiError {
    ApiError::method_not_allowed()
}

/// `/products/` with no id segment, any method.
pub async fn missing_id() -> ApiError {
    ApiError::validation("invalid id")
}
