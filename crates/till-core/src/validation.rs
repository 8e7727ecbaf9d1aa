//! # Validation Module
//!
//! Input validation for line items entering the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: The type system                                              │
//! │  ├── A missing collection or missing entry is unrepresentable          │
//! │  └── &[OrderDetail] is always a real, fully-populated slice            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Empty order, non-positive quantity, malformed SKU                 │
//! │  └── Runs before any pricing rule sees the input                       │
//! │                                                                         │
//! │  Either the whole order is valid, or no rule executes at all.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::types::{OrderDetail, ProductId};
//! use till_core::validation::validate_order_details;
//!
//! let details = [OrderDetail::new(ProductId::new("COKE-330"), 3)];
//! assert!(validate_order_details(&details).is_ok());
//! assert!(validate_order_details(&[]).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::OrderDetail;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product SKU.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_product_id;
///
/// assert!(validate_product_id("COKE-330").is_ok());
/// assert!(validate_product_id("").is_err());
/// assert!(validate_product_id("has space").is_err());
/// ```
pub fn validate_product_id(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "product".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "product".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "product".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Order Validator
// =============================================================================

/// Validates a full set of line items before pricing.
///
/// This is the boundary check both `calculate_total` and `checkout` run
/// first: an order that fails here never reaches a pricing rule.
///
/// ## Rules
/// - At least one line item
/// - At most MAX_ORDER_LINES (100) line items
/// - Every line item passes [`validate_product_id`] and [`validate_quantity`]
///
/// ## Example
/// ```rust
/// use till_core::types::{OrderDetail, ProductId};
/// use till_core::validation::validate_order_details;
///
/// let ok = [OrderDetail::new(ProductId::new("COKE-330"), 2)];
/// assert!(validate_order_details(&ok).is_ok());
///
/// let bad = [OrderDetail::new(ProductId::new("COKE-330"), 0)];
/// assert!(validate_order_details(&bad).is_err());
/// ```
pub fn validate_order_details(details: &[OrderDetail]) -> ValidationResult<()> {
    if details.is_empty() {
        return Err(ValidationError::Required {
            field: "order details".to_string(),
        });
    }

    if details.len() > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "order lines".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }

    for detail in details {
        validate_product_id(detail.product.as_str())?;
        validate_quantity(detail.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_validate_product_id() {
        // Valid SKUs
        assert!(validate_product_id("COKE-330").is_ok());
        assert!(validate_product_id("ABC123").is_ok());
        assert!(validate_product_id("product_1").is_ok());

        // Invalid SKUs
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id("has space").is_err());
        assert!(validate_product_id(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_order_details_empty() {
        assert!(validate_order_details(&[]).is_err());
    }

    #[test]
    fn test_validate_order_details_rejects_bad_line() {
        let details = vec![
            OrderDetail::new(ProductId::new("COKE-330"), 2),
            OrderDetail::new(ProductId::new("CHIPS-50"), 0), // invalid
        ];
        assert!(validate_order_details(&details).is_err());
    }

    #[test]
    fn test_validate_order_details_too_many_lines() {
        let details: Vec<OrderDetail> = (0..=MAX_ORDER_LINES)
            .map(|i| OrderDetail::new(ProductId::new(format!("SKU-{i}")), 1))
            .collect();
        assert!(validate_order_details(&details).is_err());
    }

    #[test]
    fn test_validate_order_details_ok() {
        let details = vec![
            OrderDetail::new(ProductId::new("COKE-330"), 2),
            OrderDetail::new(ProductId::new("CHIPS-50"), 5),
        ];
        assert!(validate_order_details(&details).is_ok());
    }
}
