//! # Product Handlers
//!
//! CRUD, substring search and bulk create for `/products`.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutating Request                                     │
//! │                                                                         │
//! │  body bytes ──► serde_json ──► ProductPayload (all fields optional)     │
//! │       │ decode error ──► 400 "<decoder message>"                        │
//! │       ▼                                                                 │
//! │  validate_draft / validate_patch / validate_batch                      │
//! │       │ first failing check (name, price, stock) ──► 400               │
//! │       ▼                                                                 │
//! │  ProductDraft / ProductPatch ──► ProductRepository                      │
//! │       │ DbError::NotFound ──► 404 "product not found"                   │
//! │       │ any other DbError ──► 500 "<raw message>"                       │
//! │       ▼                                                                 │
//! │  200 / 201 envelope                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::time::Instant;
use stockroom_core::validation::{validate_batch, validate_draft, validate_patch};
use stockroom_core::{Product, ProductPayload};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, ProductId};
use crate::response::ApiResponse;
use crate::AppState;

/// Query string of `GET /products/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// `GET /products`: every product, ascending id.
pub async fn list(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Product>>> {
    let start = Instant::now();

    let products = state.db.products().get_all().await?;

    debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "list_products complete"
    );

    Ok(ApiResponse::ok(products))
}

/// `POST /products`: create one product, answered with 201.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ApiResult<ApiResponse<Product>> {
    let draft = validate_draft(payload)?;

    let product = state.db.products().create(&draft).await?;

    info!(id = product.id, name = %product.name, "Product created");

    Ok(ApiResponse::created(product))
}

/// `GET /products/{id}`
pub async fn get(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> ApiResult<ApiResponse<Product>> {
    debug!(id, "get_product");

    let product = state.db.products().get_by_id(id).await?;

    Ok(ApiResponse::ok(product))
}

/// `PUT /products/{id}`: replace name, price and stock.
///
/// All three fields are required, exactly as for create.
pub async fn update(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ApiResult<ApiResponse<Product>> {
    let draft = validate_draft(payload)?;

    let product = state.db.products().update(id, &draft).await?;

    info!(id, "Product updated");

    Ok(ApiResponse::ok(product))
}

/// `PATCH /products/{id}`: change only the fields present in the body.
///
/// An empty object is rejected with "no fields to update".
pub async fn patch(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> ApiResult<ApiResponse<Product>> {
    let patch = validate_patch(payload)?;

    let product = state.db.products().partial_update(id, &patch).await?;

    info!(
        id,
        name = patch.name().is_some(),
        price = patch.price().is_some(),
        stock = patch.stock().is_some(),
        "Product patched"
    );

    Ok(ApiResponse::ok(product))
}

/// `DELETE /products/{id}`: answered with `data: null`.
pub async fn delete(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> ApiResult<ApiResponse<()>> {
    state.db.products().delete(id).await?;

    info!(id, "Product deleted");

    Ok(ApiResponse::ok(()))
}

/// `GET /products/search?name=<substring>`
///
/// The term is matched literally (no wildcards) and is not trimmed. A
/// missing or empty `name` is a 400; no matches is an empty list.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<ApiResponse<Vec<Product>>> {
    let start = Instant::now();

    let term = match params {
        Ok(Query(SearchParams { name: Some(name) })) if !name.is_empty() => name,
        Ok(_) => return Err(ApiError::validation("name is required")),
        Err(rejection) => return Err(ApiError::validation(rejection.body_text())),
    };

    let products = state.db.products().search(&term).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        term = %term,
        "search_products complete"
    );

    Ok(ApiResponse::ok(products))
}

/// `POST /products/bulk`: create every product of a JSON array or none.
///
/// The whole batch is validated before the first insert; the inserts share
/// one transaction.
pub async fn bulk_create(
    State(state): State<AppState>,
    JsonBody(payloads): JsonBody<Vec<ProductPayload>>,
) -> ApiResult<ApiResponse<Vec<Product>>> {
    let start = Instant::now();

    let drafts = validate_batch(payloads)?;

    let products = state.db.products().bulk_create(&drafts).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "bulk_create complete"
    );

    Ok(ApiResponse::created(products))
}
