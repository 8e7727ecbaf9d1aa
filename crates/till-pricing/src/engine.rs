//! # Calculation Engine
//!
//! Owns the ordered rule list and drives the convergence loop.
//!
//! ## The Convergence Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Calculation Engine                                 │
//! │                                                                         │
//! │  validate input ──► build fresh context ──► RUNNING                    │
//! │                                               │                         │
//! │              ┌────────────────────────────────┤                         │
//! │              │                                ▼                         │
//! │              │                 ┌───────────────────────────┐            │
//! │              │                 │  one PASS:                │            │
//! │              │                 │  every rule, in order,    │            │
//! │              │                 │  exactly once             │            │
//! │              │                 └─────────────┬─────────────┘            │
//! │              │                               ▼                          │
//! │              │                 remaining set empty? ──yes──► DONE       │
//! │              │                               │              (total)     │
//! │              │                               no                         │
//! │              │                               ▼                          │
//! │              │                 units decreased this pass?               │
//! │              └──────────yes──────────────────┤                          │
//! │                                              no                         │
//! │                                              ▼                          │
//! │                                       NoProgress error                  │
//! │                                                                         │
//! │  WHY ORDERED RULES: specific rules (bundles, multi-buys) run before    │
//! │  catch-all unit pricing, so they get first claim on quantities. A      │
//! │  later pass lets a rule use quantity left over by an earlier one.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Termination
//! Quantities are finite non-negative integers and every surviving pass
//! strictly decreases their sum, so the loop cannot run more passes than the
//! initial unit count. The progress guard turns the remaining failure mode
//! (a rule set that covers nothing left) into an immediate error.

use std::sync::Arc;

use tracing::{debug, warn};

use till_core::{validation::validate_order_details, Money, OrderDetail, ProductId};

use crate::context::CalculateRuleContext;
use crate::error::{PricingError, PricingResult};
use crate::rules::PricingRule;

// =============================================================================
// Calculation Engine
// =============================================================================

/// Runs an ordered list of pricing rules over an order until every unit is
/// priced.
///
/// The rule list is the engine's only configuration. Rules are held behind
/// `Arc` so one configured engine can serve concurrent checkouts: each call
/// builds its own private context, and the shared list is only ever read.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use till_core::{Money, OrderDetail, ProductId};
/// use till_pricing::engine::CalculationEngine;
/// use till_pricing::rules::UnitPriceRule;
///
/// let mut engine = CalculationEngine::default();
/// engine.push_rule(Arc::new(
///     UnitPriceRule::new().with_price(ProductId::new("COKE-330"), Money::from_cents(200)),
/// ));
///
/// let details = [OrderDetail::new(ProductId::new("COKE-330"), 3)];
/// let total = engine.calculate_total(&details).unwrap();
/// assert_eq!(total, Money::from_cents(600));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculationEngine {
    rules: Vec<Arc<dyn PricingRule>>,
}

impl CalculationEngine {
    /// Creates an engine with the given ordered rule list.
    pub fn new(rules: Vec<Arc<dyn PricingRule>>) -> Self {
        CalculationEngine { rules }
    }

    /// The configured rules, in evaluation order.
    #[inline]
    pub fn rules(&self) -> &[Arc<dyn PricingRule>] {
        &self.rules
    }

    /// Replaces the whole rule list.
    pub fn set_rules(&mut self, rules: Vec<Arc<dyn PricingRule>>) {
        self.rules = rules;
    }

    /// Appends a rule at the end of the evaluation order.
    pub fn push_rule(&mut self, rule: Arc<dyn PricingRule>) {
        self.rules.push(rule);
    }

    /// Computes the total for a set of line items.
    ///
    /// Validates the input first; no rule runs on a bad order. Then loops
    /// full passes over the rule list until the remaining set is empty and
    /// returns the accumulated total.
    ///
    /// ## Errors
    /// - [`PricingError::Validation`] for empty input or an invalid line item
    /// - [`PricingError::NoProgress`] when a full pass claims nothing while
    ///   quantities remain (no configured rule covers some product)
    pub fn calculate_total(&self, details: &[OrderDetail]) -> PricingResult<Money> {
        validate_order_details(details)?;

        let mut ctx = CalculateRuleContext::new(details);
        let mut passes: u32 = 0;

        while !ctx.is_fully_priced() {
            passes += 1;
            let units_before = ctx.remaining_units();

            // The list is borrowed for the whole call, so the pass sees a
            // stable rule order even if the engine is reconfigured between
            // calculations.
            for rule in &self.rules {
                rule.calculate(&mut ctx);
            }

            let units_after = ctx.remaining_units();
            debug!(
                pass = passes,
                units_before,
                units_after,
                total = %ctx.total(),
                "pricing pass complete"
            );

            if units_after == units_before {
                let remaining: Vec<ProductId> = ctx
                    .remaining()
                    .iter()
                    .map(|e| e.product.clone())
                    .collect();
                warn!(
                    pass = passes,
                    ?remaining,
                    "no rule claimed any remaining quantity, aborting"
                );
                return Err(PricingError::NoProgress { passes, remaining });
            }
        }

        Ok(ctx.total())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
