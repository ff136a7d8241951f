//! # Domain Types
//!
//! Reference data consumed by the order logic.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  Cash           │       │
//! │  │  name           │   │  name           │   │  Pix            │       │
//! │  │  brand?         │   │  phone?         │   │  Debit          │       │
//! │  │  unit           │   │                 │   │  Credit         │       │
//! │  │  price          │   │                 │   │  CreditSale     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities carry a UUID `id` for database relations; the order additionally
//! carries a human-facing sequential `number` (see [`crate::order`]).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Updating a product's price does not retroactively change historical
/// line items: each line item captures its own unit price at sale time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the clerk and on exports.
    pub name: String,

    /// Optional brand. Empty/absent means "no brand".
    pub brand: Option<String>,

    /// Sale unit, e.g. "un", "m³", "saco 50kg".
    pub unit: String,

    /// Current price per unit (exact decimal, 2 decimal places).
    #[ts(as = "String")]
    pub price: Decimal,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Display name including the brand when present: `Cimento CP-II (Votoran)`.
    pub fn display_name(&self) -> String {
        match self.brand.as_deref() {
            Some(brand) if !brand.is_empty() => format!("{} ({})", self.name, brand),
            _ => self.name.clone(),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record, required for credit ("fiado") sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer name. Non-blank; used for exact-match lookup.
    pub name: String,

    /// Optional phone, free-form (no format validation).
    pub phone: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How an order was paid.
///
/// ## CreditSale ("Fiado")
/// A sale on store credit for later collection. Orders with this method
/// MUST have a customer attached; see [`crate::order::validate_order_payment`].
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// PIX instant transfer.
    Pix,
    /// Debit card.
    Debit,
    /// Credit card.
    Credit,
    /// Store credit ("fiado") - requires an attached customer.
    CreditSale,
}

impl PaymentMethod {
    /// All methods, in display order.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Pix,
        PaymentMethod::Debit,
        PaymentMethod::Credit,
        PaymentMethod::CreditSale,
    ];

    /// Static display label, maintained alongside the enum so UI code
    /// never needs its own conditional mapping.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Debit => "Débito",
            PaymentMethod::Credit => "Crédito",
            PaymentMethod::CreditSale => "Fiado",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(name: &str, brand: Option<&str>) -> Product {
        Product {
            id: "p-1".to_string(),
            name: name.to_string(),
            brand: brand.map(str::to_string),
            unit: "un".to_string(),
            price: Decimal::new(1050, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_with_brand() {
        let p = product("Cimento CP-II 50kg", Some("Votoran"));
        assert_eq!(p.display_name(), "Cimento CP-II 50kg (Votoran)");
    }

    #[test]
    fn test_display_name_without_brand() {
        assert_eq!(product("Areia Média", None).display_name(), "Areia Média");
        assert_eq!(product("Areia Média", Some("")).display_name(), "Areia Média");
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(), "Dinheiro");
        assert_eq!(PaymentMethod::CreditSale.label(), "Fiado");
        assert_eq!(PaymentMethod::ALL.len(), 5);
    }

    #[test]
    fn test_payment_method_default() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }
}
