//! # Rule Context
//!
//! The shared working state for one pricing calculation.
//!
//! ## How Rules Cooperate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CalculateRuleContext                                 │
//! │                                                                         │
//! │  order_details (read-only)      remaining (claimable)      total       │
//! │  ──────────────────────────     ─────────────────────      ─────       │
//! │  COKE-330 × 4                   COKE-330: 7                $0.00       │
//! │  COKE-330 × 3    ──aggregate──► CHIPS-50: 2                            │
//! │  CHIPS-50 × 2                                                          │
//! │                                                                         │
//! │  Bundle rule: claim(COKE-330, 6) ──► remaining COKE-330: 1, +$10.00    │
//! │  Unit rule:   claim(COKE-330, 1) ──► entry removed,       +$2.00      │
//! │               claim(CHIPS-50, 2) ──► entry removed,       +$3.00      │
//! │                                                                         │
//! │  remaining empty ──► calculation done, total $15.00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A claim never exceeds what is actually remaining; `claim` returns the
//!   amount it really took, so a rule cannot price quantity twice
//! - An entry that reaches zero is removed immediately; the remaining list
//!   never holds a zero-quantity row
//! - The running total only grows; rules add contributions, nothing subtracts
//!
//! The context is built fresh for every calculation and owned exclusively by
//! it. Concurrent checkouts each get their own context, so there is nothing
//! to lock.

use till_core::{Money, OrderDetail, ProductId};

// =============================================================================
// Quantity Aggregation
// =============================================================================

/// One row of the working aggregate: a product and how many of its units are
/// still unpriced.
///
/// Quantity is always positive while the entry is in the remaining list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingEntry {
    pub product: ProductId,
    pub quantity: i64,
}

/// Groups line items by product and sums their quantities.
///
/// Output order is first-seen order of each product, so the same input
/// traversal always produces the same aggregate. Pure function; the input is
/// untouched.
///
/// ## Example
/// ```rust
/// use till_core::types::{OrderDetail, ProductId};
/// use till_pricing::context::aggregate;
///
/// let details = [
///     OrderDetail::new(ProductId::new("COKE-330"), 4),
///     OrderDetail::new(ProductId::new("CHIPS-50"), 2),
///     OrderDetail::new(ProductId::new("COKE-330"), 3),
/// ];
/// let remaining = aggregate(&details);
///
/// assert_eq!(remaining.len(), 2);
/// assert_eq!(remaining[0].quantity, 7); // 4 + 3, first-seen position
/// ```
pub fn aggregate(details: &[OrderDetail]) -> Vec<RemainingEntry> {
    let mut entries: Vec<RemainingEntry> = Vec::new();

    for detail in details {
        match entries.iter_mut().find(|e| e.product == detail.product) {
            Some(entry) => entry.quantity += detail.quantity,
            None => entries.push(RemainingEntry {
                product: detail.product.clone(),
                quantity: detail.quantity,
            }),
        }
    }

    entries
}

// =============================================================================
// Calculate Rule Context
// =============================================================================

/// Mutable working state threaded through one calculation.
///
/// Rules see the original line items read-only, the aggregated remaining
/// quantities through the claim API, and the running total through
/// [`add_to_total`](CalculateRuleContext::add_to_total). The fields are
/// private so the invariants above hold no matter what a rule does.
#[derive(Debug)]
pub struct CalculateRuleContext {
    /// The original line items, exactly as submitted (read-only).
    order_details: Vec<OrderDetail>,

    /// Quantities not yet priced by any rule. Shrinks as rules claim.
    remaining: Vec<RemainingEntry>,

    /// Accumulated total. Only ever grows.
    total: Money,
}

impl CalculateRuleContext {
    /// Builds a fresh context from validated line items.
    ///
    /// The remaining list is an independently owned aggregate; mutating it
    /// never touches the caller's details or any cached aggregate elsewhere.
    pub fn new(details: &[OrderDetail]) -> Self {
        CalculateRuleContext {
            remaining: aggregate(details),
            order_details: details.to_vec(),
            total: Money::zero(),
        }
    }

    /// The original line items (read-only).
    #[inline]
    pub fn order_details(&self) -> &[OrderDetail] {
        &self.order_details
    }

    /// The quantities still unpriced.
    #[inline]
    pub fn remaining(&self) -> &[RemainingEntry] {
        &self.remaining
    }

    /// How many units of one product are still unpriced (0 if none).
    pub fn remaining_quantity(&self, product: &ProductId) -> i64 {
        self.remaining
            .iter()
            .find(|e| &e.product == product)
            .map_or(0, |e| e.quantity)
    }

    /// Total unpriced units across all products.
    ///
    /// The engine compares this before and after each pass to detect a rule
    /// set that stopped making progress.
    pub fn remaining_units(&self) -> i64 {
        self.remaining.iter().map(|e| e.quantity).sum()
    }

    /// True once every unit has been claimed by some rule.
    #[inline]
    pub fn is_fully_priced(&self) -> bool {
        self.remaining.is_empty()
    }

    /// The total accumulated so far.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Claims up to `quantity` units of `product` from the remaining set.
    ///
    /// Returns the amount actually claimed: the full request if available,
    /// whatever was left if not, 0 if the product has no remaining entry.
    /// An entry that reaches zero is removed.
    ///
    /// A rule prices exactly what this returns, which is what makes claims
    /// between independent rules non-overlapping.
    pub fn claim(&mut self, product: &ProductId, quantity: i64) -> i64 {
        if quantity <= 0 {
            return 0;
        }

        let Some(pos) = self.remaining.iter().position(|e| &e.product == product) else {
            return 0;
        };

        let entry = &mut self.remaining[pos];
        let claimed = quantity.min(entry.quantity);
        entry.quantity -= claimed;

        if entry.quantity == 0 {
            self.remaining.remove(pos);
        }

        claimed
    }

    /// Adds a rule's contribution to the running total.
    ///
    /// Contributions are non-negative; a discount rule expresses itself by
    /// claiming quantity and crediting a smaller amount, not by subtracting.
    pub fn add_to_total(&mut self, amount: Money) {
        debug_assert!(
            !amount.is_negative(),
            "rule contributions must not be negative"
        );
        self.total += amount;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> Vec<OrderDetail> {
        vec![
            OrderDetail::new(ProductId::new("COKE-330"), 4),
            OrderDetail::new(ProductId::new("CHIPS-50"), 2),
            OrderDetail::new(ProductId::new("COKE-330"), 3),
        ]
    }

    #[test]
    fn test_aggregate_groups_by_product() {
        let remaining = aggregate(&details());

        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].product, ProductId::new("COKE-330"));
        assert_eq!(remaining[0].quantity, 7);
        assert_eq!(remaining[1].product, ProductId::new("CHIPS-50"));
        assert_eq!(remaining[1].quantity, 2);
    }

    #[test]
    fn test_aggregate_is_split_insensitive() {
        // One line of 5 and a 2+3 split aggregate identically.
        let whole = [OrderDetail::new(ProductId::new("A"), 5)];
        let split = [
            OrderDetail::new(ProductId::new("A"), 2),
            OrderDetail::new(ProductId::new("A"), 3),
        ];
        assert_eq!(aggregate(&whole), aggregate(&split));
    }

    #[test]
    fn test_context_starts_at_zero() {
        let ctx = CalculateRuleContext::new(&details());

        assert_eq!(ctx.total(), Money::zero());
        assert_eq!(ctx.remaining_units(), 9);
        assert_eq!(ctx.order_details().len(), 3);
        assert!(!ctx.is_fully_priced());
    }

    #[test]
    fn test_claim_partial_then_exhaust() {
        let mut ctx = CalculateRuleContext::new(&details());
        let coke = ProductId::new("COKE-330");

        assert_eq!(ctx.claim(&coke, 6), 6);
        assert_eq!(ctx.remaining_quantity(&coke), 1);

        // Entry is removed the moment it reaches zero.
        assert_eq!(ctx.claim(&coke, 1), 1);
        assert_eq!(ctx.remaining_quantity(&coke), 0);
        assert!(ctx.remaining().iter().all(|e| e.quantity > 0));
    }

    #[test]
    fn test_claim_clamps_to_available() {
        let mut ctx = CalculateRuleContext::new(&details());
        let chips = ProductId::new("CHIPS-50");

        // Asking for more than exists claims only what exists.
        assert_eq!(ctx.claim(&chips, 10), 2);
        // A second claim of the same product gets nothing.
        assert_eq!(ctx.claim(&chips, 10), 0);
    }

    #[test]
    fn test_claim_unknown_or_nonpositive() {
        let mut ctx = CalculateRuleContext::new(&details());

        assert_eq!(ctx.claim(&ProductId::new("UNKNOWN"), 5), 0);
        assert_eq!(ctx.claim(&ProductId::new("COKE-330"), 0), 0);
        assert_eq!(ctx.claim(&ProductId::new("COKE-330"), -3), 0);
        assert_eq!(ctx.remaining_units(), 9);
    }

    #[test]
    fn test_fully_priced_when_all_claimed() {
        let mut ctx = CalculateRuleContext::new(&details());

        ctx.claim(&ProductId::new("COKE-330"), 7);
        ctx.claim(&ProductId::new("CHIPS-50"), 2);

        assert!(ctx.is_fully_priced());
        assert_eq!(ctx.remaining_units(), 0);
    }

    #[test]
    fn test_total_accumulates() {
        let mut ctx = CalculateRuleContext::new(&details());

        ctx.add_to_total(Money::from_cents(1000));
        ctx.add_to_total(Money::from_cents(300));

        assert_eq!(ctx.total(), Money::from_cents(1300));
    }
}
