//! # Domain Types
//!
//! Core domain types for checkout pricing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │   OrderDetail   │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  sku (business) │   │  product        │   │  id (UUID)      │       │
//! │  │  opaque token   │   │  quantity       │   │  details        │       │
//! │  │  Eq + Hash      │   │                 │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ProductId is the grouping contract: two line items belong to the      │
//! │  same product exactly when their ProductIds compare equal.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product Identity
// =============================================================================

/// Opaque identity token for a catalog product.
///
/// The catalog itself (names, descriptions, stock) lives outside this
/// library. Pricing only needs to tell products apart, so the token wraps
/// the business SKU and derives value equality and hashing. Rules and the
/// aggregator group line items by this equality and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identity from a business SKU.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::types::ProductId;
    ///
    /// let a = ProductId::new("COKE-330");
    /// let b = ProductId::new("COKE-330");
    /// assert_eq!(a, b); // same SKU, same product
    /// ```
    pub fn new(sku: impl Into<String>) -> Self {
        ProductId(sku.into())
    }

    /// Returns the underlying SKU string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(sku: &str) -> Self {
        ProductId::new(sku)
    }
}

// =============================================================================
// Order Detail
// =============================================================================

/// One requested line item: a product and how many units of it.
///
/// Immutable once constructed. The pricing engine reads line items but never
/// mutates them; all working state lives in the rule context instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    /// Which product is being ordered.
    pub product: ProductId,

    /// How many units. Validation rejects anything below 1.
    pub quantity: i64,
}

impl OrderDetail {
    /// Creates a line item.
    pub fn new(product: ProductId, quantity: i64) -> Self {
        OrderDetail { product, quantity }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A fully priced order.
///
/// Produced once per checkout call and immutable afterwards: the details are
/// the caller's original line items, untouched, and the total is whatever
/// the rule chain accumulated. There is no partially-priced order; a failed
/// calculation constructs nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The original line items, exactly as submitted.
    pub details: Vec<OrderDetail>,

    /// Final total in cents.
    pub total_cents: i64,

    /// When the order was priced.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Assembles a priced order from the original line items and the
    /// engine's total.
    pub fn new(details: Vec<OrderDetail>, total: Money) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            details,
            total_cents: total.cents(),
            created_at: Utc::now(),
        }
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Order summary for host-facing responses (receipts, APIs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        OrderTotals {
            line_count: order.details.len(),
            total_quantity: order.details.iter().map(|d| d.quantity).sum(),
            total_cents: order.total_cents,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
