//! Route table.
//!
//! ```text
//! GET            /health
//! GET  POST      /products
//! GET            /products/search?name=
//! POST           /products/bulk
//! GET  PUT  PATCH  DELETE  /products/{id}
//!                          /products/{id}/{*rest}   same handlers as {id}
//! any            /products/                         400 "invalid id"
//! ```
//!
//! Static segments win over `{id}`, so `/products/search` never reaches
//! the id parser. On the id routes the id is checked before the method,
//! whatever the method is.

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post, MethodRouter};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, health, product};
use crate::AppState;

/// Largest accepted request body. Bigger bodies get a 413.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Builds the application router with its state attached.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/products",
            get(product::list)
                .post(product::create)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/products/search",
            get(product::search).fallback(handlers::method_not_allowed),
        )
        .route(
            "/products/bulk",
            post(product::bulk_create).fallback(handlers::method_not_allowed),
        )
        .route("/products/", any(handlers::missing_id))
        .route("/products/{id}", product_by_id())
        .route("/products/{id}/{*rest}", product_by_id())
        .fallback(handlers::route_not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn product_by_id() -> MethodRouter<AppState> {
    get(product::get)
        .put(product::update)
        .patch(product::patch)
        .delete(product::delete)
        .fallback(handlers::product_method_not_allowed)
}
