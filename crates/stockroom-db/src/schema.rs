//! # Schema Bootstrap
//!
//! Idempotent creation of the `products` table.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Startup Bootstrap                                  │
//! │                                                                         │
//! │  Database::new(config)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CREATE TABLE IF NOT EXISTS products (...)                             │
//! │       │                                                                 │
//! │       ├── Table exists?  no-op                                         │
//! │       └── Table missing? created                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Server starts accepting requests                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is a single table and no versioned migrations. A failure here is a
//! startup precondition failure: the caller should not start serving.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};

/// DDL for the products table.
///
/// `price > 0` and `stock >= 0` are not CHECK constraints; they are enforced
/// by `stockroom_core::validation` before a row ever reaches SQL.
pub const PRODUCTS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
)
"#;

/// Ensures the schema exists.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Existing rows are never touched
pub async fn initialize(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring products table exists");

    sqlx::query(PRODUCTS_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    info!("Products table initialized");
    Ok(())
}

/// Returns true if the products table is present.
///
/// ## Usage
/// For diagnostics and tests.
pub async fn products_table_exists(pool: &SqlitePool) -> DbResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'products'",
    )
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
