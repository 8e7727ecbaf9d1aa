//! # till-pricing: Rule Engine for Till
//!
//! This crate computes the total price of an order by running an ordered
//! chain of pricing rules against a shared, mutable context until every unit
//! is priced.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pricing Architecture                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 CalculationEngine (engine.rs)                    │  │
//! │  │                                                                  │  │
//! │  │  Holds the ordered rule list                                     │  │
//! │  │  Loops full passes until the remaining set is empty              │  │
//! │  │  Aborts with NoProgress when a pass claims nothing               │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ offers &mut context to each rule        │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ BundlePriceRule│  │  MultiBuyRule  │  │  UnitPriceRule         │    │
//! │  │                │  │                │  │                        │    │
//! │  │ N units flat   │  │ buy N pay M    │  │ price table catch-all  │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────────┐  │
//! │  │               CalculateRuleContext (context.rs)                  │  │
//! │  │                                                                  │  │
//! │  │  order_details (read-only) • remaining quantities (claim API)    │  │
//! │  │  running total (add-only)                                        │  │
//! │  │                                                                  │  │
//! │  │  Fresh per calculation, owned exclusively by it                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`context`] - The mutable working state and the quantity aggregator
//! - [`rules`] - The `PricingRule` capability and the example rule catalog
//! - [`engine`] - The convergence loop and rule-list configuration
//! - [`checkout`] - Order assembly on top of the engine
//! - [`error`] - Pricing error types
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use till_core::{Money, OrderDetail, ProductId};
//! use till_pricing::{BundlePriceRule, CalculationEngine, UnitPriceRule};
//!
//! // Specific rules first: they get first claim on quantities.
//! let engine = CalculationEngine::new(vec![
//!     Arc::new(BundlePriceRule::new(
//!         ProductId::new("COKE-330"),
//!         3,
//!         Money::from_cents(500),
//!     )),
//!     Arc::new(
//!         UnitPriceRule::new().with_price(ProductId::new("COKE-330"), Money::from_cents(200)),
//!     ),
//! ]);
//!
//! // 7 cans: two 3-can bundles at $5.00 plus one can at $2.00.
//! let order = engine
//!     .checkout(vec![OrderDetail::new(ProductId::new("COKE-330"), 7)])
//!     .unwrap();
//! assert_eq!(order.total(), Money::from_cents(1200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod context;
pub mod engine;
pub mod error;
pub mod rules;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use context::{aggregate, CalculateRuleContext, RemainingEntry};
pub use engine::CalculationEngine;
pub use error::{PricingError, PricingResult};
pub use rules::{BundlePriceRule, MultiBuyRule, PricingRule, UnitPriceRule};
