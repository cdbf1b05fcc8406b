//! # stockroom-api: Product REST Service
//!
//! HTTP surface over the product repository.
//!
//! ## Module Organization
//! ```text
//! stockroom-api
//! ├── config    - Environment-driven server settings
//! ├── error     - ApiError and its JSON envelope
//! ├── extract   - Body and path extractors with envelope rejections
//! ├── handlers  - Health and product handlers, fallbacks
//! ├── response  - Success envelope
//! └── routes    - Router assembly
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./database.db")).await?;
//! let app = build_router(AppState::new(db));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;

use stockroom_db::Database;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use response::ApiResponse;
pub use routes::build_router;

/// Shared router state.
///
/// Holds the one database handle built at startup; handlers reach the
/// repository through it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
