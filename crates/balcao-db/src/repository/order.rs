//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. BUILD IN MEMORY (cart state, desktop app)                          │
//! │     └── Order::new(next_order_number(max), method, customer)           │
//! │     └── push_item() / remove_item()                                    │
//! │                                                                         │
//! │  2. PERSIST ONCE, ATOMICALLY                                           │
//! │     └── insert_with_items()                                            │
//! │         ├── stamp created_at (if unset)                                │
//! │         ├── INSERT header (total from Order::total(), as cents)        │
//! │         ├── INSERT every line item (subtotal rounded, as cents)        │
//! │         └── COMMIT — header and items land together or not at all      │
//! │                                                                         │
//! │  3. READ-ONLY AFTERWARDS                                               │
//! │     └── find_history() / headers_in_period()                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The header stores the order total as integer cents so that report SUMs
//! stay exact; the domain total is recomputed from items when hydrating.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use balcao_core::reports::OrderHeader;
use balcao_core::{money, Customer, Order, OrderItem, PaymentMethod};

use crate::error::DbResult;

/// Raw database row for an order header joined with its customer.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    number: i64,
    created_at: DateTime<Utc>,
    payment_method: PaymentMethod,
    customer_id: Option<String>,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    customer_created_at: Option<DateTime<Utc>>,
    customer_updated_at: Option<DateTime<Utc>>,
}

impl OrderRow {
    fn customer(&self) -> Option<Customer> {
        let id = self.customer_id.clone()?;
        Some(Customer {
            id,
            name: self.customer_name.clone().unwrap_or_default(),
            phone: self.customer_phone.clone(),
            created_at: self.customer_created_at.unwrap_or_default(),
            updated_at: self.customer_updated_at.unwrap_or_default(),
        })
    }
}

/// Raw database row for an order line item.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    product_id: String,
    product_name: String,
    quantity_milli: i64,
    unit_price_cents: i64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: Some(row.order_id),
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: Some(money::from_milli(row.quantity_milli)),
            unit_price: Some(money::from_cents(row.unit_price_cents)),
        }
    }
}

/// Raw row for the fallback daily-sales projection.
#[derive(Debug, sqlx::FromRow)]
struct HeaderRow {
    created_at: DateTime<Utc>,
    total_cents: i64,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Returns the highest order number assigned so far.
    ///
    /// `None` when no orders exist; feed the result to
    /// [`balcao_core::next_order_number`].
    pub async fn max_number(&self) -> DbResult<Option<i64>> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(number) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(max)
    }

    /// Persists an order and all of its line items in one transaction.
    ///
    /// Stamps `created_at` if the caller has not. The stored header total
    /// is `Order::total()` converted to cents; each item stores its rounded
    /// subtotal. Either everything lands or nothing does.
    pub async fn insert_with_items(&self, order: &mut Order) -> DbResult<()> {
        let now = Utc::now();
        order.stamp_created_at(now);
        let created_at = order.created_at.unwrap_or(now);

        debug!(
            id = %order.id,
            number = order.number,
            items = order.items.len(),
            "Persisting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, number, created_at, payment_method, customer_id, total_cents)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(order.number)
        .bind(created_at)
        .bind(order.payment_method)
        .bind(order.customer.as_ref().map(|c| c.id.clone()))
        .bind(money::to_cents(order.total()))
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_name,
                    quantity_milli, unit_price_cents, subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&item.id)
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity.map(money::to_milli).unwrap_or(0))
            .bind(item.unit_price.map(money::to_cents).unwrap_or(0))
            .bind(item.subtotal().map(money::to_cents).unwrap_or(0))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets a fully hydrated order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "{HISTORY_SELECT} WHERE o.id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists historical orders, newest first, with items hydrated.
    ///
    /// All three filters are optional: `start`/`end` bound the creation
    /// timestamp inclusively, `customer_id` restricts to one customer.
    pub async fn find_history(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        customer_id: Option<&str>,
    ) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            r#"
            {HISTORY_SELECT}
            WHERE (?1 IS NULL OR o.created_at >= ?1)
              AND (?2 IS NULL OR o.created_at <= ?2)
              AND (?3 IS NULL OR o.customer_id = ?3)
            ORDER BY o.created_at DESC, o.number DESC
            "#
        ))
        .bind(start)
        .bind(end)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }

        Ok(orders)
    }

    /// Fetches minimal order headers in a period for the manual daily-sales
    /// aggregation (`balcao_core::reports::daily_sales_from_orders`).
    pub async fn headers_in_period(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<OrderHeader>> {
        let rows: Vec<HeaderRow> = sqlx::query_as(
            r#"
            SELECT created_at, total_cents
            FROM orders
            WHERE (?1 IS NULL OR created_at >= ?1)
              AND (?2 IS NULL OR created_at <= ?2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OrderHeader {
                created_at: Some(row.created_at),
                total: Some(money::from_cents(row.total_cents)),
            })
            .collect())
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Attaches line items to a header row, producing the domain order.
    async fn hydrate(&self, row: OrderRow) -> DbResult<Order> {
        let items: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, product_name,
                   quantity_milli, unit_price_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let customer = row.customer();

        Ok(Order {
            id: row.id,
            number: row.number,
            created_at: Some(row.created_at),
            payment_method: row.payment_method,
            customer,
            items: items.into_iter().map(OrderItem::from).collect(),
        })
    }
}

/// Shared SELECT for hydrating order headers with their customer.
const HISTORY_SELECT: &str = r#"
    SELECT o.id, o.number, o.created_at, o.payment_method,
           o.customer_id,
           c.name AS customer_name,
           c.phone AS customer_phone,
           c.created_at AS customer_created_at,
           c.updated_at AS customer_updated_at
    FROM orders o
    LEFT JOIN customers c ON c.id = o.customer_id
"#;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use balcao_core::{next_order_number, Product};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price: &str) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            brand: None,
            unit: "un".to_string(),
            price: dec(price),
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    async fn seed_customer(db: &Database, name: &str) -> Customer {
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: None,
            created_at: now,
            updated_at: now,
        };
        db.customers().insert(&customer).await.unwrap();
        customer
    }

    #[tokio::test]
    async fn test_insert_and_hydrate_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, "Areia Média", "120.00").await;
        let customer = seed_customer(&db, "Maria Silva").await;

        let mut order = Order::new(1, PaymentMethod::CreditSale, Some(customer.clone()));
        order.push_item(OrderItem::new(&product, dec("2.5"), dec("120.00")));
        db.orders().insert_with_items(&mut order).await.unwrap();

        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.number, 1);
        assert_eq!(loaded.payment_method, PaymentMethod::CreditSale);
        assert_eq!(loaded.customer.as_ref().unwrap().name, "Maria Silva");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].quantity, Some(dec("2.500")));
        assert_eq!(loaded.total(), dec("300.00"));
    }

    #[tokio::test]
    async fn test_max_number_feeds_allocator() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();
        let product = seed_product(&db, "Cimento", "32.90").await;

        assert_eq!(repo.max_number().await.unwrap(), None);
        assert_eq!(next_order_number(repo.max_number().await.unwrap()), 1);

        for expected in 1..=3 {
            let number = next_order_number(repo.max_number().await.unwrap());
            assert_eq!(number, expected);

            let mut order = Order::new(number, PaymentMethod::Cash, None);
            order.push_item(OrderItem::new(&product, dec("1"), dec("32.90")));
            repo.insert_with_items(&mut order).await.unwrap();
        }

        assert_eq!(repo.max_number().await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_duplicate_number_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, "Brita 1", "90.00").await;

        let mut first = Order::new(7, PaymentMethod::Cash, None);
        first.push_item(OrderItem::new(&product, dec("1"), dec("90.00")));
        db.orders().insert_with_items(&mut first).await.unwrap();

        let mut clash = Order::new(7, PaymentMethod::Pix, None);
        clash.push_item(OrderItem::new(&product, dec("1"), dec("90.00")));
        let err = db.orders().insert_with_items(&mut clash).await.unwrap_err();
        assert!(matches!(err, crate::error::DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_insert_stamps_created_at_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, "Tijolo", "1.10").await;

        let stamped = Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 0).unwrap();
        let mut order = Order::new(1, PaymentMethod::Cash, None);
        order.stamp_created_at(stamped);
        order.push_item(OrderItem::new(&product, dec("100"), dec("1.10")));
        db.orders().insert_with_items(&mut order).await.unwrap();

        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.created_at, Some(stamped));
    }

    #[tokio::test]
    async fn test_find_history_filters_and_orders_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, "Cimento", "32.90").await;
        let maria = seed_customer(&db, "Maria Silva").await;

        for (number, day, customer) in [
            (1, 10, Some(maria.clone())),
            (2, 12, None),
            (3, 20, Some(maria.clone())),
        ] {
            let mut order = Order::new(number, PaymentMethod::Cash, customer);
            order.stamp_created_at(Utc.with_ymd_and_hms(2023, 1, day, 9, 0, 0).unwrap());
            order.push_item(OrderItem::new(&product, dec("1"), dec("32.90")));
            db.orders().insert_with_items(&mut order).await.unwrap();
        }

        let all = db.orders().find_history(None, None, None).await.unwrap();
        let numbers: Vec<i64> = all.iter().map(|o| o.number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);

        let until_mid_month = db
            .orders()
            .find_history(
                None,
                Some(Utc.with_ymd_and_hms(2023, 1, 15, 23, 59, 59).unwrap()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(until_mid_month.len(), 2);

        let marias = db
            .orders()
            .find_history(None, None, Some(&maria.id))
            .await
            .unwrap();
        assert_eq!(marias.len(), 2);
    }

    #[tokio::test]
    async fn test_headers_in_period_projects_totals() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, "Areia", "50.00").await;

        let mut order = Order::new(1, PaymentMethod::Pix, None);
        order.stamp_created_at(Utc.with_ymd_and_hms(2023, 3, 1, 8, 0, 0).unwrap());
        order.push_item(OrderItem::new(&product, dec("3"), dec("50.00")));
        db.orders().insert_with_items(&mut order).await.unwrap();

        let headers = db.orders().headers_in_period(None, None).await.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].total, Some(dec("150.00")));
        assert!(headers[0].created_at.is_some());
    }
}
