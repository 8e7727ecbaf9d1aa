//! # Checkout
//!
//! Order assembly: validate the line items, price them, wrap the result.
//!
//! ```text
//! line items ──► validate ──► calculate_total ──► Order { details, total }
//! ```
//!
//! Assembly is the thin last step. All the interesting work happens in the
//! engine; this module only guarantees that a returned [`Order`] carries the
//! caller's original line items untouched, and that a failed calculation
//! constructs no order at all.

use till_core::{Order, OrderDetail};

use crate::engine::CalculationEngine;
use crate::error::PricingResult;

impl CalculationEngine {
    /// Prices the line items and assembles them into an immutable [`Order`].
    ///
    /// The returned order's `details` are exactly the submitted line items;
    /// its total is what [`calculate_total`](CalculationEngine::calculate_total)
    /// returns for them. Validation happens at the same boundary, before any
    /// rule runs.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use till_core::{Money, OrderDetail, ProductId};
    /// use till_pricing::engine::CalculationEngine;
    /// use till_pricing::rules::UnitPriceRule;
    ///
    /// let engine = CalculationEngine::new(vec![Arc::new(
    ///     UnitPriceRule::new().with_price(ProductId::new("COKE-330"), Money::from_cents(200)),
    /// )]);
    ///
    /// let order = engine
    ///     .checkout(vec![OrderDetail::new(ProductId::new("COKE-330"), 3)])
    ///     .unwrap();
    /// assert_eq!(order.total(), Money::from_cents(600));
    /// ```
    pub fn checkout(&self, details: Vec<OrderDetail>) -> PricingResult<Order> {
        let total = self.calculate_total(&details)?;
        Ok(Order::new(details, total))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use till_core::{Money, OrderTotals, ProductId};

    use super::*;
    use crate::error::PricingError;
    use crate::rules::{BundlePriceRule, UnitPriceRule};

    fn engine() -> CalculationEngine {
        CalculationEngine::new(vec![
            Arc::new(BundlePriceRule::new(
                ProductId::new("COKE-330"),
                3,
                Money::from_cents(500),
            )),
            Arc::new(
                UnitPriceRule::new()
                    .with_price(ProductId::new("COKE-330"), Money::from_cents(200))
                    .with_price(ProductId::new("CHIPS-50"), Money::from_cents(150)),
            ),
        ])
    }

    #[test]
    fn test_checkout_preserves_details_and_total() {
        let engine = engine();
        let details = vec![
            OrderDetail::new(ProductId::new("COKE-330"), 7),
            OrderDetail::new(ProductId::new("CHIPS-50"), 2),
        ];

        let expected_total = engine.calculate_total(&details).unwrap();
        let order = engine.checkout(details.clone()).unwrap();

        assert_eq!(order.details, details);
        assert_eq!(order.total(), expected_total);
        assert_eq!(order.total(), Money::from_cents(1500)); // $10 + $2 + $3
    }

    #[test]
    fn test_checkout_total_is_never_negative() {
        let order = engine()
            .checkout(vec![OrderDetail::new(ProductId::new("CHIPS-50"), 1)])
            .unwrap();
        assert!(!order.total().is_negative());
    }

    #[test]
    fn test_checkout_rejects_invalid_input() {
        assert!(matches!(
            engine().checkout(vec![]),
            Err(PricingError::Validation(_))
        ));
    }

    #[test]
    fn test_checkout_uncovered_product_builds_no_order() {
        let result = engine().checkout(vec![OrderDetail::new(ProductId::new("MYSTERY"), 1)]);
        assert!(matches!(result, Err(PricingError::NoProgress { .. })));
    }

    #[test]
    fn test_checkout_order_summarizes() {
        let order = engine()
            .checkout(vec![
                OrderDetail::new(ProductId::new("COKE-330"), 3),
                OrderDetail::new(ProductId::new("CHIPS-50"), 2),
            ])
            .unwrap();
        let totals = OrderTotals::from(&order);

        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.total_cents, order.total_cents);
    }
}
