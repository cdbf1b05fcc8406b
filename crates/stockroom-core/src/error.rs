//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  └── ValidationError  - Client payload violates a field constraint     │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError         - What clients see (status + message)            │
//! │                                                                         │
//! │  Flow: ValidationError ──────────────┐                                 │
//! │        DbError ──────────────────────┴──► ApiError ──► JSON envelope   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every message names the offending field and the constraint
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced before any database work happens. Every variant maps to a
/// 400 response; the `Display` text is the response message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: &'static str },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    /// A partial update carried no fields.
    #[error("no fields to update")]
    EmptyPatch,

    /// A bulk request carried no products.
    #[error("products is empty")]
    EmptyBatch,

    /// A single item of a bulk request failed validation.
    ///
    /// ## Example
    /// `products[1].price must be greater than 0`
    #[error("products[{index}].{source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wraps this error with the position of the batch item it came from.
    pub fn at_index(self, index: usize) -> Self {
        ValidationError::AtIndex {
            index,
            source: Box::new(self),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive { field: "price" };
        assert_eq!(err.to_string(), "price must be greater than 0");

        let err = ValidationError::Negative { field: "stock" };
        assert_eq!(err.to_string(), "stock cannot be negative");
    }

    #[test]
    fn test_indexed_error_message() {
        let err = ValidationError::MustBePositive { field: "price" }.at_index(1);
        assert_eq!(err.to_string(), "products[1].price must be greater than 0");
    }
}
