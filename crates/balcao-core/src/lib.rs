//! # balcao-core: Pure Business Logic for Balcão POS
//!
//! This crate is the **heart** of Balcão POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Balcão POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Frontend (WebView)                        │   │
//! │  │    Product List ──► Cart UI ──► Payment ──► History/Reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Tauri IPC                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                       Tauri Commands                            │   │
//! │  │    add_to_cart, create_order, daily_sales, export_history_csv  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ balcao-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │  reports  │  │   │
//! │  │   │  Product  │  │  Decimal  │  │   Order   │  │ DailySales│  │   │
//! │  │   │  Customer │  │  rounding │  │ OrderItem │  │  fallback │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    balcao-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Reference data (Product, Customer, PaymentMethod)
//! - [`money`] - Exact-decimal rounding and storage conversion
//! - [`order`] - Order aggregate, line items, numbering, payment validation
//! - [`reports`] - Report row types and the fallback daily-sales aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Clerk input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Exact Decimals**: Money and quantities use `rust_decimal`, never floats
//! 4. **Computed Totals**: Subtotals and totals are derived accessors,
//!    never independently settable fields
//!
//! ## Example Usage
//!
//! ```rust
//! use balcao_core::order::{next_order_number, Order, OrderItem};
//! use balcao_core::types::PaymentMethod;
//!
//! let mut order = Order::new(next_order_number(Some(5)), PaymentMethod::Cash, None);
//! assert_eq!(order.number, 6);
//!
//! order.push_item(OrderItem::from_parts(
//!     "p-1",
//!     "Cimento CP-II 50kg",
//!     Some("2".parse().unwrap()),
//!     Some("32.90".parse().unwrap()),
//! ));
//! assert_eq!(order.total(), "65.80".parse().unwrap());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use balcao_core::Order` instead of
// `use balcao_core::order::Order`

pub use error::{CoreError, CoreResult, ValidationError};
pub use order::{next_order_number, validate_order_payment, Order, OrderItem};
pub use types::{Customer, PaymentMethod, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of rows returned by ranked reports (top products,
/// top customers) when the caller does not specify a limit.
pub const DEFAULT_REPORT_LIMIT: u32 = 10;
