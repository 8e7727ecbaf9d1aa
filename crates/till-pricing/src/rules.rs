//! # Pricing Rules
//!
//! The [`PricingRule`] capability and a small catalog of ready-made rules.
//!
//! A rule is one unit of pricing policy: it looks at the context, claims the
//! quantities it knows how to price, and credits its contribution to the
//! total. The engine runs rules in list order, so put specific rules
//! (bundles, multi-buys) before catch-all unit pricing; earlier rules get
//! first claim on quantities.
//!
//! This module ships three implementations:
//!
//! - [`UnitPriceRule`]: prices everything in its price table per unit.
//!   The conventional catch-all that guarantees progress for any product
//!   with a listed price.
//! - [`BundlePriceRule`]: every N units of one product for a flat price.
//! - [`MultiBuyRule`]: "buy N, pay for M" at a unit price.
//!
//! Hosts register any further rule by implementing the trait.

use std::collections::HashMap;
use std::fmt;

use till_core::{Money, ProductId};

use crate::context::CalculateRuleContext;

// =============================================================================
// Rule Capability
// =============================================================================

/// A pluggable unit of pricing logic.
///
/// ## Contract
///
/// - A rule may be invoked multiple times across multiple passes and must
///   only act on quantity still present in the context. Going through
///   [`CalculateRuleContext::claim`] satisfies this automatically: claimed
///   quantity is gone, so it cannot be priced twice.
/// - A rule that finds nothing applicable leaves the context unchanged and
///   returns normally. This is the common case, not an error.
/// - Contributions are added via
///   [`CalculateRuleContext::add_to_total`] and are never negative.
/// - Implementations must not carry interior mutability if the configured
///   rule list is shared across concurrent checkouts; `Send + Sync` is
///   required, statelessness is on the rule author.
pub trait PricingRule: fmt::Debug + Send + Sync {
    /// Inspects the context, claims whatever this rule prices, and credits
    /// the contribution.
    fn calculate(&self, ctx: &mut CalculateRuleContext);

    /// Returns the name of this rule (for logs and debugging).
    fn name(&self) -> &'static str;
}

// =============================================================================
// Unit Price Rule
// =============================================================================

/// Prices products per unit from a price table.
///
/// Claims the full remaining quantity of every product it has a price for
/// and credits `quantity × unit_price`. Products not in the table are left
/// untouched. By convention this rule goes last in the list so bundle and
/// multi-buy rules claim their groups first.
///
/// ## Example
/// ```rust
/// use till_core::{Money, ProductId};
/// use till_pricing::rules::UnitPriceRule;
///
/// let rule = UnitPriceRule::new()
///     .with_price(ProductId::new("COKE-330"), Money::from_cents(200))
///     .with_price(ProductId::new("CHIPS-50"), Money::from_cents(150));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitPriceRule {
    prices: HashMap<ProductId, Money>,
}

impl UnitPriceRule {
    /// Creates a rule with an empty price table.
    pub fn new() -> Self {
        UnitPriceRule {
            prices: HashMap::new(),
        }
    }

    /// Adds a unit price to the table (builder style).
    pub fn with_price(mut self, product: ProductId, unit_price: Money) -> Self {
        self.prices.insert(product, unit_price);
        self
    }

    /// Looks up the unit price for a product.
    pub fn price_for(&self, product: &ProductId) -> Option<Money> {
        self.prices.get(product).copied()
    }
}

impl PricingRule for UnitPriceRule {
    fn calculate(&self, ctx: &mut CalculateRuleContext) {
        // Snapshot the priceable products first; claiming mutates the
        // remaining list we would otherwise be iterating.
        let priceable: Vec<ProductId> = ctx
            .remaining()
            .iter()
            .filter(|e| self.prices.contains_key(&e.product))
            .map(|e| e.product.clone())
            .collect();

        for product in priceable {
            let available = ctx.remaining_quantity(&product);
            let claimed = ctx.claim(&product, available);
            if claimed > 0 {
                let unit_price = self.prices[&product];
                ctx.add_to_total(unit_price.multiply_quantity(claimed));
            }
        }
    }

    fn name(&self) -> &'static str {
        "unit_price"
    }
}

// =============================================================================
// Bundle Price Rule
// =============================================================================

/// Prices whole bundles of one product at a flat rate.
///
/// Claims only complete multiples of `bundle_size`; the leftover units stay
/// in the context for a later rule (typically the unit-price catch-all).
/// "Every 3 cans for $5" over 7 cans claims 6, credits $10, and leaves 1.
#[derive(Debug, Clone)]
pub struct BundlePriceRule {
    product: ProductId,
    /// Units per bundle, always > 0.
    bundle_size: i64,
    bundle_price: Money,
}

impl BundlePriceRule {
    /// Creates a bundle rule. `bundle_size` below 1 makes the rule inert.
    pub fn new(product: ProductId, bundle_size: i64, bundle_price: Money) -> Self {
        BundlePriceRule {
            product,
            bundle_size,
            bundle_price,
        }
    }
}

impl PricingRule for BundlePriceRule {
    fn calculate(&self, ctx: &mut CalculateRuleContext) {
        if self.bundle_size <= 0 {
            return;
        }

        let available = ctx.remaining_quantity(&self.product);
        let bundles = available / self.bundle_size;
        if bundles == 0 {
            return;
        }

        let claimed = ctx.claim(&self.product, bundles * self.bundle_size);
        // Whole bundles only; the claim can never come up short because we
        // just read the availability.
        debug_assert_eq!(claimed, bundles * self.bundle_size);
        ctx.add_to_total(self.bundle_price.multiply_quantity(bundles));
    }

    fn name(&self) -> &'static str {
        "bundle_price"
    }
}

// =============================================================================
// Multi-Buy Rule
// =============================================================================

/// "Buy N, pay for M" promotion at a unit price (e.g. 3-for-2).
///
/// Claims whole groups of `group_size` and credits `pay_for × unit_price`
/// per group. Leftover units below a full group are left for later rules.
#[derive(Debug, Clone)]
pub struct MultiBuyRule {
    product: ProductId,
    /// Units the customer takes per group, always > 0.
    group_size: i64,
    /// Units the customer pays for per group, 0 <= pay_for <= group_size.
    pay_for: i64,
    unit_price: Money,
}

impl MultiBuyRule {
    /// Creates a multi-buy rule. Degenerate sizes make the rule inert.
    pub fn new(product: ProductId, group_size: i64, pay_for: i64, unit_price: Money) -> Self {
        MultiBuyRule {
            product,
            group_size,
            pay_for,
            unit_price,
        }
    }
}

impl PricingRule for MultiBuyRule {
    fn calculate(&self, ctx: &mut CalculateRuleContext) {
        if self.group_size <= 0 || self.pay_for < 0 || self.pay_for > self.group_size {
            return;
        }

        let available = ctx.remaining_quantity(&self.product);
        let groups = available / self.group_size;
        if groups == 0 {
            return;
        }

        ctx.claim(&self.product, groups * self.group_size);
        ctx.add_to_total(self.unit_price.multiply_quantity(groups * self.pay_for));
    }

    fn name(&self) -> &'static str {
        "multi_buy"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::OrderDetail;

    fn ctx_with(product: &str, quantity: i64) -> CalculateRuleContext {
        CalculateRuleContext::new(&[OrderDetail::new(ProductId::new(product), quantity)])
    }

    #[test]
    fn test_unit_price_rule_claims_all_known_products() {
        let mut ctx = CalculateRuleContext::new(&[
            OrderDetail::new(ProductId::new("COKE-330"), 3),
            OrderDetail::new(ProductId::new("CHIPS-50"), 2),
        ]);
        let rule = UnitPriceRule::new()
            .with_price(ProductId::new("COKE-330"), Money::from_cents(200))
            .with_price(ProductId::new("CHIPS-50"), Money::from_cents(150));

        rule.calculate(&mut ctx);

        assert!(ctx.is_fully_priced());
        assert_eq!(ctx.total(), Money::from_cents(900)); // 3×$2.00 + 2×$1.50
    }

    #[test]
    fn test_unit_price_rule_leaves_unknown_products() {
        let mut ctx = CalculateRuleContext::new(&[
            OrderDetail::new(ProductId::new("COKE-330"), 3),
            OrderDetail::new(ProductId::new("MYSTERY"), 1),
        ]);
        let rule =
            UnitPriceRule::new().with_price(ProductId::new("COKE-330"), Money::from_cents(200));

        rule.calculate(&mut ctx);

        assert_eq!(ctx.total(), Money::from_cents(600));
        assert_eq!(ctx.remaining_quantity(&ProductId::new("MYSTERY")), 1);
    }

    #[test]
    fn test_unit_price_rule_is_idempotent_once_claimed() {
        let mut ctx = ctx_with("COKE-330", 3);
        let rule =
            UnitPriceRule::new().with_price(ProductId::new("COKE-330"), Money::from_cents(200));

        rule.calculate(&mut ctx);
        rule.calculate(&mut ctx); // second pass finds nothing to claim

        assert_eq!(ctx.total(), Money::from_cents(600));
    }

    #[test]
    fn test_bundle_rule_claims_whole_bundles_only() {
        let mut ctx = ctx_with("COKE-330", 7);
        let rule = BundlePriceRule::new(ProductId::new("COKE-330"), 3, Money::from_cents(500));

        rule.calculate(&mut ctx);

        // Two bundles of 3 claimed, one unit left for a later rule.
        assert_eq!(ctx.total(), Money::from_cents(1000));
        assert_eq!(ctx.remaining_quantity(&ProductId::new("COKE-330")), 1);
    }

    #[test]
    fn test_bundle_rule_below_bundle_size_does_nothing() {
        let mut ctx = ctx_with("COKE-330", 2);
        let rule = BundlePriceRule::new(ProductId::new("COKE-330"), 3, Money::from_cents(500));

        rule.calculate(&mut ctx);

        assert_eq!(ctx.total(), Money::zero());
        assert_eq!(ctx.remaining_quantity(&ProductId::new("COKE-330")), 2);
    }

    #[test]
    fn test_bundle_rule_inert_on_degenerate_size() {
        let mut ctx = ctx_with("COKE-330", 5);
        let rule = BundlePriceRule::new(ProductId::new("COKE-330"), 0, Money::from_cents(500));

        rule.calculate(&mut ctx);

        assert_eq!(ctx.remaining_units(), 5);
        assert_eq!(ctx.total(), Money::zero());
    }

    #[test]
    fn test_multi_buy_three_for_two() {
        let mut ctx = ctx_with("SOAP-100", 7);
        let rule = MultiBuyRule::new(ProductId::new("SOAP-100"), 3, 2, Money::from_cents(300));

        rule.calculate(&mut ctx);

        // Two groups: pay for 4 of the 6 claimed. One unit left over.
        assert_eq!(ctx.total(), Money::from_cents(1200));
        assert_eq!(ctx.remaining_quantity(&ProductId::new("SOAP-100")), 1);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(UnitPriceRule::new().name(), "unit_price");
        assert_eq!(
            BundlePriceRule::new(ProductId::new("A"), 3, Money::zero()).name(),
            "bundle_price"
        );
        assert_eq!(
            MultiBuyRule::new(ProductId::new("A"), 3, 2, Money::zero()).name(),
            "multi_buy"
        );
    }
}
