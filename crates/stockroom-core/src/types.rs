//! # Domain Types
//!
//! The product entity and the payload shapes that lead to it.
//!
//! ## Type Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product Lifecycle                               │
//! │                                                                         │
//! │  JSON body                                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductPayload  (every field optional, straight from serde)           │
//! │       │                                                                 │
//! │       ├── validate_draft() ──► ProductDraft  (POST, PUT, bulk items)   │
//! │       │                                                                 │
//! │       └── validate_patch() ──► ProductPatch  (PATCH)                   │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                         ProductRepository (stockroom-db)               │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                         Product  (id + timestamps assigned)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ProductDraft` and `ProductPatch` have private fields and can only be
//! built through [`crate::validation`], so anything the repository receives
//! already satisfies `price > 0` and `stock >= 0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Auto-assigned primary key. Never changes after creation.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price, always greater than zero.
    pub price: f64,

    /// Units on hand, never negative.
    pub stock: i64,

    /// When the product was created. Never changes.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Payload
// =============================================================================

/// Raw product fields as sent by a client.
///
/// Missing keys and explicit `null` both deserialize to `None`; whether that
/// is acceptable depends on the operation (see [`crate::validation`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub stock: Option<i64>,
}

// =============================================================================
// Draft
// =============================================================================

/// A validated, not yet persisted product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub(crate) name: String,
    pub(crate) price: f64,
    pub(crate) stock: i64,
}

impl ProductDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }
}

// =============================================================================
// Patch
// =============================================================================

/// A validated partial update. At least one field is `Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPatch {
    pub(crate) name: Option<String>,
    pub(crate) price: Option<f64>,
    pub(crate) stock: Option<i64>,
}

impl ProductPatch {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn stock(&self) -> Option<i64> {
        self.stock
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
