//! # Order Aggregate
//!
//! The order header plus its line items, with a derived, always-consistent
//! total. This module owns the numbering rule and the payment/customer
//! validation rule; persistence lives in `balcao-db`.
//!
//! ## Total Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How Totals Compose                                 │
//! │                                                                         │
//! │  OrderItem { quantity: 2,    unit_price: 10.00 } ── subtotal: 20.00    │
//! │  OrderItem { quantity: 1,    unit_price: 25.50 } ── subtotal: 25.50    │
//! │  OrderItem { quantity: None, unit_price: 9.99  } ── subtotal: None     │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │  Order::total() = Σ subtotal (None counted as 0) = 45.50               │
//! │                                                                         │
//! │  Subtotal and total are COMPUTED ACCESSORS, never stored fields:       │
//! │  there is no way to mutate the items and observe a stale total.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Clamping
//! Negative quantities and unit prices are permitted and propagate
//! arithmetically (returns/adjustments). Input validation for clerk-entered
//! values lives in [`crate::validation`], at the UI boundary only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::round_currency;
use crate::types::{Customer, PaymentMethod, Product};

// =============================================================================
// Order Line Item
// =============================================================================

/// One product line within an order.
///
/// ## Snapshot Pattern
/// The product is referenced by id for identity, but `product_name` and
/// `unit_price` are captured at the time the item is added. Later product
/// updates never change historical line items.
///
/// ## Parent Handle
/// `order_id` is a non-owning back-reference, set by [`Order::push_item`]
/// and cleared by [`Order::remove_item`]. The order owns its items; items
/// do not own the order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning order id, once attached.
    pub order_id: Option<String>,

    /// Product reference (identity).
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Quantity sold. May be fractional (bulk materials in m³).
    #[ts(as = "Option<String>")]
    pub quantity: Option<Decimal>,

    /// Unit price captured when the item was added (frozen).
    #[ts(as = "Option<String>")]
    pub unit_price: Option<Decimal>,
}

impl OrderItem {
    /// Creates a line item from a product, capturing its name.
    ///
    /// The unit price is passed explicitly rather than read from the
    /// product: the clerk may override the price at the counter.
    pub fn new(product: &Product, quantity: Decimal, unit_price: Decimal) -> Self {
        OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: None,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    /// Creates a line item from raw fields (used when loading from storage
    /// and in tests).
    pub fn from_parts(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
    ) -> Self {
        OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: None,
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// The persisted subtotal: `unit_price × quantity`, rounded half-up to
    /// 2 decimal places.
    ///
    /// Returns `None` if and only if quantity or unit price is absent.
    /// Deterministic: recomputed from the current fields on every call.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.raw_subtotal().map(round_currency)
    }

    /// The unrounded product of `unit_price × quantity`.
    ///
    /// Used by transient UI view-models, which display the raw value;
    /// rounding is applied only when the order is persisted.
    pub fn raw_subtotal(&self) -> Option<Decimal> {
        match (self.unit_price, self.quantity) {
            (Some(price), Some(qty)) => Some(price * qty),
            _ => None,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order: header plus line items.
///
/// Created in memory with an empty item list, mutated via
/// [`push_item`](Order::push_item) / [`remove_item`](Order::remove_item),
/// then persisted once as a unit. Once persisted, orders are immutable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Sequential business number, unique and monotonically assigned.
    pub number: i64,

    /// Creation timestamp. Stamped at persistence time if unset.
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    /// How the order was (or will be) paid.
    pub payment_method: PaymentMethod,

    /// Attached customer. Required when `payment_method` is `CreditSale`.
    pub customer: Option<Customer>,

    /// Line items, in insertion order (display order only; totals do not
    /// depend on it).
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Creates a new in-memory order with an empty item list.
    pub fn new(number: i64, payment_method: PaymentMethod, customer: Option<Customer>) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            number,
            created_at: None,
            payment_method,
            customer,
            items: Vec::new(),
        }
    }

    /// Appends a line item, attaching it to this order.
    pub fn push_item(&mut self, mut item: OrderItem) {
        item.order_id = Some(self.id.clone());
        self.items.push(item);
    }

    /// Removes a line item by id, clearing its parent handle.
    ///
    /// A no-op returning `None` if no item with that id is present.
    pub fn remove_item(&mut self, item_id: &str) -> Option<OrderItem> {
        let pos = self.items.iter().position(|i| i.id == item_id)?;
        let mut item = self.items.remove(pos);
        item.order_id = None;
        Some(item)
    }

    /// The order total: exact-decimal sum of every item's subtotal, with
    /// absent subtotals counted as zero.
    ///
    /// Computed on demand, so it is consistent after any mutation and
    /// idempotent across repeated calls.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(OrderItem::subtotal)
            .fold(Decimal::ZERO, |acc, s| acc + s)
    }

    /// Sets the creation timestamp if it is still unset.
    ///
    /// Called by the storage layer immediately before the first (and only)
    /// persistence of the order.
    pub fn stamp_created_at(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
    }
}

// =============================================================================
// Order Number Allocation
// =============================================================================

/// Derives the next sequential order number from the maximum existing one.
///
/// `None` (no orders exist) is treated as 0, so the first order is number 1.
///
/// ## Race Safety
/// This is read-then-compute with no uniqueness enforcement here; the
/// UNIQUE constraint on the orders table is the backstop. Correct under
/// the single-writer access of a single-user desktop app.
#[inline]
pub const fn next_order_number(max_existing: Option<i64>) -> i64 {
    match max_existing {
        Some(max) => max + 1,
        None => 1,
    }
}

// =============================================================================
// Creation-Time Validation
// =============================================================================

/// Rejects order creation when a credit sale has no attached customer.
///
/// Runs before any persistence call, so an invalid credit sale is never
/// saved. Every other payment method accepts an optional customer.
pub fn validate_order_payment(
    method: PaymentMethod,
    customer: Option<&Customer>,
) -> CoreResult<()> {
    if method == PaymentMethod::CreditSale && customer.is_none() {
        return Err(CoreError::CustomerRequired);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(name: &str, qty: &str, price: &str) -> OrderItem {
        OrderItem::from_parts("p-1", name, Some(dec(qty)), Some(dec(price)))
    }

    fn customer(name: &str) -> Customer {
        Customer {
            id: "c-1".to_string(),
            name: name.to_string(),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_subtotal_rounds_half_up_to_currency_scale() {
        let it = item("Areia Média", "2.5", "25.50");
        assert_eq!(it.subtotal(), Some(dec("63.75")));

        // 3 × 3.333 = 9.999 → 10.00 once rounded
        let it = item("Brita 1", "3", "3.333");
        assert_eq!(it.raw_subtotal(), Some(dec("9.999")));
        assert_eq!(it.subtotal(), Some(dec("10.00")));
    }

    #[test]
    fn test_subtotal_none_iff_field_absent() {
        let mut it = item("Cimento", "2", "10.00");
        assert!(it.subtotal().is_some());

        it.quantity = None;
        assert_eq!(it.subtotal(), None);

        it.quantity = Some(dec("2"));
        it.unit_price = None;
        assert_eq!(it.subtotal(), None);
    }

    #[test]
    fn test_raw_subtotal_is_exact_and_unrounded() {
        let it = item("Parafuso", "0.0001", "0.0001");
        assert_eq!(it.raw_subtotal(), Some(dec("0.00000001")));
    }

    #[test]
    fn test_negative_values_propagate_without_clamping() {
        let it = item("Devolução", "-2", "10.00");
        assert_eq!(it.subtotal(), Some(dec("-20.00")));

        let mut order = Order::new(1, PaymentMethod::Cash, None);
        order.push_item(item("Venda", "1", "30.00"));
        order.push_item(item("Devolução", "-2", "10.00"));
        assert_eq!(order.total(), dec("10.00"));
    }

    #[test]
    fn test_total_tracks_add_and_remove() {
        let mut order = Order::new(1, PaymentMethod::Cash, None);
        assert_eq!(order.total(), Decimal::ZERO);

        let first = item("Produto A", "2", "10.00");
        let first_id = first.id.clone();
        order.push_item(first);
        order.push_item(item("Produto B", "1", "25.50"));
        assert_eq!(order.total(), dec("45.50"));

        let removed = order.remove_item(&first_id).unwrap();
        assert_eq!(removed.order_id, None);
        assert_eq!(order.total(), dec("25.50"));
    }

    #[test]
    fn test_total_counts_missing_subtotal_as_zero() {
        let mut order = Order::new(1, PaymentMethod::Pix, None);
        order.push_item(item("Produto A", "1", "25.50"));
        order.push_item(OrderItem::from_parts("p-2", "Produto B", None, Some(dec("9.99"))));
        assert_eq!(order.total(), dec("25.50"));
    }

    #[test]
    fn test_total_is_idempotent() {
        let mut order = Order::new(7, PaymentMethod::Debit, None);
        order.push_item(item("Produto A", "3", "7.77"));
        let first = order.total();
        let second = order.total();
        assert_eq!(first, second);
        assert_eq!(first, dec("23.31"));
    }

    #[test]
    fn test_push_item_sets_parent_handle() {
        let mut order = Order::new(1, PaymentMethod::Cash, None);
        order.push_item(item("Produto A", "1", "1.00"));
        assert_eq!(order.items[0].order_id.as_deref(), Some(order.id.as_str()));
    }

    #[test]
    fn test_remove_absent_item_is_a_noop() {
        let mut order = Order::new(1, PaymentMethod::Cash, None);
        order.push_item(item("Produto A", "1", "1.00"));
        assert!(order.remove_item("no-such-id").is_none());
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_stamp_created_at_only_sets_when_unset() {
        let mut order = Order::new(1, PaymentMethod::Cash, None);
        let first = Utc.with_ymd_and_hms(2023, 1, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2023, 1, 16, 10, 0, 0).unwrap();

        order.stamp_created_at(first);
        assert_eq!(order.created_at, Some(first));

        order.stamp_created_at(later);
        assert_eq!(order.created_at, Some(first));
    }

    #[test]
    fn test_next_order_number() {
        assert_eq!(next_order_number(None), 1);
        assert_eq!(next_order_number(Some(0)), 1);
        assert_eq!(next_order_number(Some(5)), 6);
    }

    #[test]
    fn test_credit_sale_requires_customer() {
        let err = validate_order_payment(PaymentMethod::CreditSale, None).unwrap_err();
        assert!(matches!(err, CoreError::CustomerRequired));

        let c = customer("Maria");
        assert!(validate_order_payment(PaymentMethod::CreditSale, Some(&c)).is_ok());
        assert!(validate_order_payment(PaymentMethod::Cash, None).is_ok());
    }
}
