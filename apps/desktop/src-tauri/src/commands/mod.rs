//! # Tauri Commands Module
//!
//! All commands exposed to the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product catalog CRUD
//! ├── customer.rs ◄─── Customer CRUD
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── order.rs    ◄─── Order creation, history, CSV export
//! ├── report.rs   ◄─── Sales report aggregations
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tauri Command Flow                                   │
//! │                                                                         │
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  import { invoke } from '@tauri-apps/api/core';                         │
//! │                                                                         │
//! │  const order = await invoke('create_order', {                           │
//! │    method: 'credit_sale',                                               │
//! │    customerName: 'Maria Silva'                                          │
//! │  });                                                                    │
//! │         │                                                               │
//! │         │ (IPC via WebView)                                             │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  #[tauri::command]                                                      │
//! │  async fn create_order(                                                 │
//! │      db: State<'_, DbState>,     ◄── Injected by Tauri                 │
//! │      cart: State<'_, CartState>, ◄── Injected by Tauri                 │
//! │      method: PaymentMethod,      ◄── From invoke params                │
//! │      customer_name: Option<String>,                                     │
//! │  ) -> Result<CreateOrderResponse, ApiError>                             │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Frontend receives: CreateOrderResponse                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn list_products(db: State<'_, DbState>)
//!
//! // Only needs cart
//! async fn get_cart(cart: State<'_, CartState>)
//!
//! // Needs both
//! async fn create_order(db: State<'_, DbState>, cart: State<'_, CartState>, ...)
//! ```

pub mod cart;
pub mod config;
pub mod customer;
pub mod order;
pub mod product;
pub mod report;

use chrono::NaiveDate;

use crate::error::ApiError;

/// Parses an optional `YYYY-MM-DD` report bound from the frontend.
pub(crate) fn parse_day(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| ApiError::validation(format!("{} must be a YYYY-MM-DD date", field))),
    }
}
