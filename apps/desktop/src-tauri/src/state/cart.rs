//! # Cart State
//!
//! Manages the in-progress order being built at the counter.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Tauri commands can run concurrently
//!
//! ## Transient vs Persisted Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Arithmetic Boundary                             │
//! │                                                                         │
//! │  While the cart is open (this module):                                  │
//! │    line subtotal = unit_price × quantity   ← UNROUNDED, full precision  │
//! │    cart total    = Σ line subtotals        ← UNROUNDED                  │
//! │                                                                         │
//! │  When the order is persisted (balcao-db):                               │
//! │    line subtotal ← rounded half-up to 2 decimal places                  │
//! │    order total   ← Σ rounded subtotals                                  │
//! │                                                                         │
//! │  The clerk sees exact intermediate math; the books see currency.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use balcao_core::{OrderItem, Product};

/// The in-progress cart: line items not yet attached to an order.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Line items capture product name and unit price when added (frozen)
#[derive(Debug, Clone, Default)]
pub struct Cart {
    /// Line items, in insertion order.
    pub items: Vec<OrderItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// The unit price is frozen at add time; a repeated add keeps the
    /// originally captured price and only bumps the quantity.
    pub fn add_item(&mut self, product: &Product, quantity: Decimal, unit_price: Decimal) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity = Some(item.quantity.unwrap_or(Decimal::ZERO) + quantity);
            return;
        }

        self.items.push(OrderItem::new(product, quantity, unit_price));
    }

    /// Sets the quantity of a line item; a zero quantity removes the line.
    ///
    /// Returns `false` when no line with that id exists.
    pub fn update_quantity(&mut self, item_id: &str, quantity: Decimal) -> bool {
        if quantity.is_zero() {
            return self.remove_item(item_id);
        }

        match self.items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.quantity = Some(quantity);
                true
            }
            None => false,
        }
    }

    /// Removes a line item by id. Returns `false` when absent.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The unrounded running total: Σ raw line subtotals, absent counted
    /// as zero.
    pub fn raw_total(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(OrderItem::raw_subtotal)
            .fold(Decimal::ZERO, |acc, s| acc + s)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart snapshot for API responses.
///
/// Subtotals here are the raw, unrounded products; rounding happens only
/// at persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: Decimal,
}

/// One cart line for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub subtotal: Option<Decimal>,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart
                .items
                .iter()
                .map(|item| CartLineView {
                    id: item.id.clone(),
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    subtotal: item.raw_subtotal(),
                })
                .collect(),
            total: cart.raw_total(),
        }
    }
}

/// Tauri-managed cart state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>`:
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one thread modifies the cart at a time
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn test_product(id: &str, price: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {}", id),
            brand: None,
            unit: "un".to_string(),
            price: dec(price),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("1", "25.50");

        cart.add_item(&product, dec("2"), product.price);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.raw_total(), dec("51.00"));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", "10.00");

        cart.add_item(&product, dec("2"), product.price);
        cart.add_item(&product, dec("3"), product.price);

        assert_eq!(cart.items.len(), 1); // Still one line
        assert_eq!(cart.items[0].quantity, Some(dec("5")));
    }

    #[test]
    fn test_cart_total_is_unrounded() {
        let mut cart = Cart::new();
        let product = test_product("1", "3.333");

        cart.add_item(&product, dec("3"), product.price);

        // 3 × 3.333 = 9.999 stays unrounded until persistence
        assert_eq!(cart.raw_total(), dec("9.999"));
    }

    #[test]
    fn test_cart_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        let product = test_product("1", "10.00");
        cart.add_item(&product, dec("2"), product.price);
        let item_id = cart.items[0].id.clone();

        assert!(cart.update_quantity(&item_id, dec("0")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_remove_missing_item_reports_false() {
        let mut cart = Cart::new();
        assert!(!cart.remove_item("no-such-id"));
    }

    #[test]
    fn test_cart_view_exposes_raw_subtotals() {
        let mut cart = Cart::new();
        let product = test_product("1", "0.0001");
        cart.add_item(&product, dec("0.0001"), product.price);

        let view = CartView::from(&cart);
        assert_eq!(view.items[0].subtotal, Some(dec("0.00000001")));
        assert_eq!(view.total, dec("0.00000001"));
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        let product = test_product("1", "5.00");
        cart.add_item(&product, dec("1"), product.price);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.raw_total(), Decimal::ZERO);
    }
}
