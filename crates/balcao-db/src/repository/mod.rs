//! # Repository Module
//!
//! Database repository implementations for Balcão POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Tauri Command                                                         │
//! │       │                                                                 │
//! │       │  db.orders().find_history(start, end, None)                    │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── max_number(&self)                                                 │
//! │  ├── insert_with_items(&self, order)                                   │
//! │  └── find_history(&self, start, end, customer_id)                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Storage boundary: `Decimal` in the domain, integer cents (scale 2)    │
//! │  and integer thousandths (scale 3) on disk. Every repository converts  │
//! │  at its edges via `balcao_core::money`, so SQL SUMs stay exact.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD
//! - [`customer::CustomerRepository`] - Customer CRUD and exact-name lookup
//! - [`order::OrderRepository`] - Order persistence, numbering, history
//! - [`report::ReportRepository`] - Sales report aggregations

pub mod customer;
pub mod order;
pub mod product;
pub mod report;
