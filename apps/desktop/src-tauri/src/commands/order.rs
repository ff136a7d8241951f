//! # Order Commands
//!
//! Finalizing the cart into a persisted order, browsing history, and
//! exporting history as CSV.
//!
//! ## Order Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      create_order Flow                                  │
//! │                                                                         │
//! │  1. Snapshot cart items (reject empty cart)                            │
//! │  2. Resolve customer by exact name: find existing or create new        │
//! │  3. Validate payment rule ── fiado without customer? ──► REJECT        │
//! │     (validation happens BEFORE any order persistence)                  │
//! │  4. Allocate number = MAX(number) + 1                                  │
//! │  5. Persist order + items atomically (subtotals rounded here)          │
//! │  6. Clear the cart                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::{debug, info};
use uuid::Uuid;

use balcao_core::reports::day_range;
use balcao_core::validation::validate_customer_name;
use balcao_core::{validate_order_payment, Customer, Order, OrderItem, PaymentMethod};
use balcao_db::Database;

use crate::commands::parse_day;
use crate::error::ApiError;
use crate::state::{CartState, DbState};

/// Response for a successfully created order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub number: i64,
    pub created_at: DateTime<Utc>,
    pub total: Decimal,
    pub item_count: usize,
}

/// One historical order for the history screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub number: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub payment_method: PaymentMethod,
    pub payment_label: String,
    pub customer_name: Option<String>,
    pub total: Decimal,
    pub items: Vec<OrderItemDto>,
}

/// One line item of a historical order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub product_name: String,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub subtotal: Option<Decimal>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        OrderDto {
            total: order.total(),
            id: order.id,
            number: order.number,
            created_at: order.created_at,
            payment_method: order.payment_method,
            payment_label: order.payment_method.label().to_string(),
            customer_name: order.customer.map(|c| c.name),
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemDto {
                    subtotal: item.subtotal(),
                    product_name: item.product_name,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
        }
    }
}

/// Response for a history CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub path: String,
    pub rows: usize,
}

#[tauri::command]
pub async fn create_order(
    db: State<'_, DbState>,
    cart: State<'_, CartState>,
    method: PaymentMethod,
    customer_name: Option<String>,
) -> Result<CreateOrderResponse, ApiError> {
    debug!(?method, "create_order command");

    let items: Vec<OrderItem> = cart.with_cart(|c| c.items.clone());
    if items.is_empty() {
        return Err(ApiError::validation("Cart is empty"));
    }

    let db_inner: &Database = db.database();

    let customer = resolve_customer(db_inner, customer_name).await?;

    // Fiado without a customer must never reach persistence
    validate_order_payment(method, customer.as_ref())?;

    let max = db_inner.orders().max_number().await?;
    let number = balcao_core::next_order_number(max);

    let mut order = Order::new(number, method, customer);
    for item in items {
        order.push_item(item);
    }

    db_inner.orders().insert_with_items(&mut order).await?;

    cart.with_cart_mut(|c| c.clear());

    info!(
        order_id = %order.id,
        number = order.number,
        total = %order.total(),
        items = order.items.len(),
        "Order created"
    );

    Ok(CreateOrderResponse {
        order_id: order.id.clone(),
        number: order.number,
        created_at: order.created_at.unwrap_or_else(Utc::now),
        total: order.total(),
        item_count: order.items.len(),
    })
}

/// The number the next finalized order will receive, for display on the
/// payment dialog. Purely informational; the number is allocated again at
/// creation time.
#[tauri::command]
pub async fn next_order_number(db: State<'_, DbState>) -> Result<i64, ApiError> {
    let max = db.database().orders().max_number().await?;
    Ok(balcao_core::next_order_number(max))
}

#[tauri::command]
pub async fn order_history(
    db: State<'_, DbState>,
    start: Option<String>,
    end: Option<String>,
    customer_id: Option<String>,
) -> Result<Vec<OrderDto>, ApiError> {
    debug!(?start, ?end, ?customer_id, "order_history command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);

    let orders = db
        .database()
        .orders()
        .find_history(start, end, customer_id.as_deref())
        .await?;

    Ok(orders.into_iter().map(OrderDto::from).collect())
}

#[tauri::command]
pub async fn export_history_csv(
    db: State<'_, DbState>,
    start: Option<String>,
    end: Option<String>,
    customer_id: Option<String>,
) -> Result<ExportResponse, ApiError> {
    debug!(?start, ?end, "export_history_csv command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);

    let orders = db
        .database()
        .orders()
        .find_history(start, end, customer_id.as_deref())
        .await?;

    let csv = render_history_csv(&orders);
    let path = export_file_path()?;

    std::fs::write(&path, csv)
        .map_err(|e| ApiError::export(format!("Could not write export file: {}", e)))?;

    info!(path = %path.display(), rows = orders.len(), "History exported");

    Ok(ExportResponse {
        path: path.display().to_string(),
        rows: orders.len(),
    })
}

/// Finds or creates the customer for an order.
///
/// A blank or absent name means "walk-in customer" (no record). Repeated
/// sales to the same typed name converge on one customer record via exact
/// match on the trimmed name.
async fn resolve_customer(
    db: &Database,
    customer_name: Option<String>,
) -> Result<Option<Customer>, ApiError> {
    let Some(raw) = customer_name else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let name = validate_customer_name(&raw).map_err(balcao_core::CoreError::from)?;

    if let Some(existing) = db.customers().get_by_name(&name).await? {
        return Ok(Some(existing));
    }

    let now = Utc::now();
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name,
        phone: None,
        created_at: now,
        updated_at: now,
    };
    db.customers().insert(&customer).await?;

    info!(id = %customer.id, name = %customer.name, "Customer created from order flow");
    Ok(Some(customer))
}

/// Renders orders as semicolon-separated CSV (Brazilian Excel default).
fn render_history_csv(orders: &[Order]) -> String {
    let mut csv = String::from("Numero;Data;Pagamento;Cliente;Total\n");

    for order in orders {
        let date = order
            .created_at
            .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default();
        let customer = order
            .customer
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("");

        csv.push_str(&format!(
            "{};{};{};{};{:.2}\n",
            order.number,
            date,
            order.payment_method.label(),
            csv_field(customer),
            order.total(),
        ));
    }

    csv
}

/// Quotes a field when it contains the separator or quotes.
fn csv_field(value: &str) -> String {
    if value.contains(';') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Builds the export file path under the user's Documents folder.
fn export_file_path() -> Result<std::path::PathBuf, ApiError> {
    let user_dirs = directories::UserDirs::new()
        .ok_or_else(|| ApiError::export("Could not determine home directory"))?;

    let base = user_dirs
        .document_dir()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| user_dirs.home_dir().to_path_buf())
        .join("BalcaoPOS");

    std::fs::create_dir_all(&base)
        .map_err(|e| ApiError::export(format!("Could not create export directory: {}", e)))?;

    let filename = format!("historico_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    Ok(base.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_core::OrderItem;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_render_history_csv() {
        let mut order = Order::new(7, PaymentMethod::Pix, None);
        order.stamp_created_at(Utc.with_ymd_and_hms(2023, 1, 15, 14, 30, 0).unwrap());
        order.push_item(OrderItem::from_parts(
            "p-1",
            "Cimento",
            Some(dec("2")),
            Some(dec("32.90")),
        ));

        let csv = render_history_csv(&[order]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Numero;Data;Pagamento;Cliente;Total"));
        assert_eq!(lines.next(), Some("7;15/01/2023 14:30;PIX;;65.80"));
    }

    #[test]
    fn test_csv_field_quotes_separator() {
        assert_eq!(csv_field("Maria"), "Maria");
        assert_eq!(csv_field("Silva; Maria"), "\"Silva; Maria\"");
        assert_eq!(csv_field("Jo\"ao"), "\"Jo\"\"ao\"");
    }

    #[test]
    fn test_order_dto_carries_label_and_total() {
        let mut order = Order::new(1, PaymentMethod::CreditSale, None);
        order.push_item(OrderItem::from_parts(
            "p-1",
            "Areia",
            Some(dec("2.5")),
            Some(dec("120.00")),
        ));

        let dto = OrderDto::from(order);
        assert_eq!(dto.payment_label, "Fiado");
        assert_eq!(dto.total, dec("300.00"));
        assert_eq!(dto.items[0].subtotal, Some(dec("300.00")));
    }
}
