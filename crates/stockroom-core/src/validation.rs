//! # Validation Module
//!
//! Turns raw client payloads into validated drafts and patches.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Pipeline                                │
//! │                                                                         │
//! │  Step 1: HTTP handler (apps/api)                                       │
//! │  └── JSON decode; a malformed body never reaches this module           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Step 2: THIS MODULE, fields checked in a fixed order                  │
//! │  ├── name   required, non-empty                                        │
//! │  ├── price  required, > 0                                              │
//! │  └── stock  required, >= 0                                             │
//! │           │    (first failing check wins)                               │
//! │           ▼                                                             │
//! │  Step 3: Database (SQLite)                                             │
//! │  └── NOT NULL constraints only                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::validate_draft;
//! use stockroom_core::ProductPayload;
//!
//! let payload = ProductPayload {
//!     name: Some("Test Product".to_string()),
//!     price: Some(99.99),
//!     stock: Some(10),
//! };
//! let draft = validate_draft(payload).unwrap();
//! assert_eq!(draft.name(), "Test Product");
//! ```

use crate::error::ValidationError;
use crate::types::{ProductDraft, ProductPatch, ProductPayload};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// The only rule is that the name is not empty. Whitespace is kept as
/// sent and there is no length cap.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_name;
///
/// assert!(validate_name("Coca-Cola 330ml").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    Ok(())
}

/// Validates a unit price. Zero is rejected, there are no free items.
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::MustBePositive { field: "price" });
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative { field: "stock" });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a full payload (create, full update, bulk item).
///
/// Every field is required. Checks run name, price, stock; the first
/// failure is returned.
pub fn validate_draft(payload: ProductPayload) -> ValidationResult<ProductDraft> {
    let name = payload
        .name
        .ok_or(ValidationError::Required { field: "name" })?;
    validate_name(&name)?;

    let price = payload
        .price
        .ok_or(ValidationError::Required { field: "price" })?;
    validate_price(price)?;

    let stock = payload
        .stock
        .ok_or(ValidationError::Required { field: "stock" })?;
    validate_stock(stock)?;

    Ok(ProductDraft { name, price, stock })
}

/// Validates a partial payload (PATCH).
///
/// Only present fields are checked, in the same order as
/// [`validate_draft`]. A payload with no fields at all is rejected.
pub fn validate_patch(payload: ProductPayload) -> ValidationResult<ProductPatch> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    if let Some(stock) = payload.stock {
        validate_stock(stock)?;
    }

    if payload.name.is_none() && payload.price.is_none() && payload.stock.is_none() {
        return Err(ValidationError::EmptyPatch);
    }

    Ok(ProductPatch {
        name: payload.name,
        price: payload.price,
        stock: payload.stock,
    })
}

/// Validates every item of a bulk request before anything is inserted.
///
/// ## Rules
/// - The batch must not be empty
/// - Every item must pass [`validate_draft`]; the first failure is reported
///   with its position, e.g. `products[1].price must be greater than 0`
pub fn validate_batch(payloads: Vec<ProductPayload>) -> ValidationResult<Vec<ProductDraft>> {
    if payloads.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| validate_draft(payload).map_err(|e| e.at_index(index)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, price: Option<f64>, stock: Option<i64>) -> ProductPayload {
        ProductPayload {
            name: name.map(str::to_string),
            price,
            stock,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Coca-Cola 330ml").is_ok());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_name_accepts_blank_and_long_names() {
        assert!(validate_name("   ").is_ok());
        assert!(validate_name(&"A".repeat(201)).is_ok());
        assert!(validate_name(&"A".repeat(5000)).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.01).is_ok());
        assert!(validate_price(99.99).is_ok());

        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(10).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_draft_accepts_valid_payload() {
        let draft = validate_draft(payload(Some("Test Product"), Some(99.99), Some(10))).unwrap();

        assert_eq!(draft.name(), "Test Product");
        assert_eq!(draft.price(), 99.99);
        assert_eq!(draft.stock(), 10);
    }

    #[test]
    fn test_validate_draft_rejects_each_constraint() {
        assert_eq!(
            validate_draft(payload(Some(""), Some(1.0), Some(1))),
            Err(ValidationError::Required { field: "name" })
        );
        assert_eq!(
            validate_draft(payload(Some("A"), Some(0.0), Some(1))),
            Err(ValidationError::MustBePositive { field: "price" })
        );
        assert_eq!(
            validate_draft(payload(Some("A"), Some(1.0), Some(-1))),
            Err(ValidationError::Negative { field: "stock" })
        );
    }

    #[test]
    fn test_validate_draft_reports_missing_fields() {
        assert_eq!(
            validate_draft(payload(Some("A"), None, Some(1))),
            Err(ValidationError::Required { field: "price" })
        );
        assert_eq!(
            validate_draft(payload(Some("A"), Some(1.0), None)),
            Err(ValidationError::Required { field: "stock" })
        );
    }

    #[test]
    fn test_validate_draft_first_failure_wins() {
        // Every field is bad; name is checked first.
        let err = validate_draft(payload(Some(""), Some(-5.0), Some(-5))).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "name" });

        let err = validate_draft(payload(Some("A"), Some(-5.0), Some(-5))).unwrap_err();
        assert_eq!(err, ValidationError::MustBePositive { field: "price" });
    }

    #[test]
    fn test_validate_patch_single_field() {
        let patch = validate_patch(payload(None, Some(123.45), None)).unwrap();

        assert_eq!(patch.price(), Some(123.45));
        assert_eq!(patch.name(), None);
        assert_eq!(patch.stock(), None);
    }

    #[test]
    fn test_validate_patch_rejects_empty() {
        assert_eq!(
            validate_patch(ProductPayload::default()),
            Err(ValidationError::EmptyPatch)
        );
    }

    #[test]
    fn test_validate_patch_checks_present_fields() {
        assert!(validate_patch(payload(Some(""), None, None)).is_err());
        assert!(validate_patch(payload(Some(" "), None, None)).is_ok());
        assert!(validate_patch(payload(None, Some(0.0), None)).is_err());
        assert!(validate_patch(payload(None, None, Some(-3))).is_err());
        assert!(validate_patch(payload(None, None, Some(0))).is_ok());
    }

    #[test]
    fn test_validate_batch() {
        let drafts = validate_batch(vec![
            payload(Some("A"), Some(10.0), Some(1)),
            payload(Some("B"), Some(20.0), Some(2)),
        ])
        .unwrap();
        assert_eq!(drafts.len(), 2);

        assert_eq!(validate_batch(vec![]), Err(ValidationError::EmptyBatch));
    }

    #[test]
    fn test_validate_batch_reports_index() {
        let err = validate_batch(vec![
            payload(Some("A"), Some(10.0), Some(1)),
            payload(Some("B"), Some(0.0), Some(1)),
        ])
        .unwrap_err();

        assert_eq!(err.to_string(), "products[1].price must be greater than 0");
    }
}
