//! # Pricing Error Types
//!
//! Error types for pricing calculations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pricing Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────────────┐  ┌──────────────────────────────────────┐ │
//! │  │       Validation        │  │           NoProgress                 │ │
//! │  │                         │  │                                      │ │
//! │  │  Bad input, rejected    │  │  Rule set left quantities unpriced   │ │
//! │  │  before any rule runs   │  │  for a full pass; aborted instead    │ │
//! │  │  (empty order, qty <= 0)│  │  of looping forever                  │ │
//! │  └─────────────────────────┘  └──────────────────────────────────────┘ │
//! │                                                                         │
//! │  Neither is retried internally. Fix the input or the rule              │
//! │  configuration and call again; there is no partial result.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use till_core::{ProductId, ValidationError};

/// Result type alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Pricing error type covering all calculation failures.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Input rejected at the validation boundary, before any rule executed.
    #[error("Invalid order: {0}")]
    Validation(#[from] ValidationError),

    /// A full pass over every rule claimed nothing while quantities remain.
    ///
    /// ## When This Occurs
    /// - No configured rule covers some product in the order
    /// - A catch-all unit-price rule is missing its price entry
    ///
    /// Signals a misconfigured rule set, not bad input: the same order
    /// prices fine once a rule covers the listed products.
    #[error("No rule claimed any remaining quantity after pass {passes}; unpriced products: {remaining:?}")]
    NoProgress {
        passes: u32,
        remaining: Vec<ProductId>,
    },
}

impl PricingError {
    /// Returns true if this error indicates a rule configuration problem
    /// rather than bad input.
    pub fn is_config_error(&self) -> bool {
        matches!(self, PricingError::NoProgress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PricingError::NoProgress {
            passes: 1,
            remaining: vec![ProductId::new("CHIPS-50")],
        };
        assert!(err.to_string().contains("pass 1"));
        assert!(err.to_string().contains("CHIPS-50"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validation_error_converts() {
        let validation = ValidationError::Required {
            field: "order details".to_string(),
        };
        let err: PricingError = validation.into();
        assert!(matches!(err, PricingError::Validation(_)));
        assert!(!err.is_config_error());
    }
}
