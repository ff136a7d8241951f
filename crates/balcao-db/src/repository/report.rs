//! # Report Repository
//!
//! Read-only aggregation queries for the sales reports screen.
//!
//! ## Two-Path Daily Sales
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  daily_sales() Orchestration                            │
//! │                                                                         │
//! │  daily_sales(start, end)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PRIMARY: daily_sales_native()                                         │
//! │    SELECT strftime('%Y-%m-%d', created_at), SUM(total_cents)           │
//! │    GROUP BY day ORDER BY day                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  needs_fallback(result)?                                               │
//! │    • Err(_)      → yes (engine refused the query)                      │
//! │    • Ok(empty)   → yes (could be "no data" OR a silently useless       │
//! │                    result; the fallback answers both identically)      │
//! │    • Ok(rows)    → no, return rows                                     │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  FALLBACK: headers_in_period() → daily_sales_from_orders()             │
//! │    (pure in-memory aggregation, balcao-core)                           │
//! │                                                                         │
//! │  Both paths return identical rows for the same data.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All other reports are single-path SQL aggregations over integer cents,
//! converted back to exact decimals at this boundary. The ticket average
//! divides in Rust rather than SQL so the rounding rule lives in one place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use balcao_core::reports::{
    daily_sales_from_orders, DailySales, PaymentDistribution, ProductSales, TicketAverage,
    TopCustomer,
};
use balcao_core::{money, PaymentMethod};

use crate::error::DbResult;
use crate::repository::order::OrderRepository;

/// Raw row for the pre-aggregated daily sales query.
#[derive(Debug, sqlx::FromRow)]
struct DailyRow {
    day: String,
    total_cents: i64,
}

/// Raw row for product ranking.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    product_name: String,
    quantity_milli: i64,
    total_cents: i64,
}

/// Raw row for per-payment-method aggregations.
#[derive(Debug, sqlx::FromRow)]
struct MethodRow {
    payment_method: PaymentMethod,
    orders: i64,
    total_cents: i64,
}

/// Raw row for payment distribution.
#[derive(Debug, sqlx::FromRow)]
struct DistributionRow {
    payment_method: PaymentMethod,
    total_cents: i64,
}

/// Raw row for customer ranking.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_name: String,
    total_cents: i64,
}

/// Repository for sales report aggregations.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Revenue per calendar day, ascending, using the two-path strategy.
    ///
    /// Tries the pre-aggregated SQL path first; falls back to fetching raw
    /// order headers and aggregating in memory when the primary path errors
    /// or returns no rows.
    pub async fn daily_sales(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<DailySales>> {
        let primary = self.daily_sales_native(start, end).await;

        if !needs_fallback(&primary) {
            return primary;
        }

        if let Err(err) = &primary {
            warn!(%err, "Pre-aggregated daily sales query failed, using manual aggregation");
        } else {
            debug!("Pre-aggregated daily sales returned no rows, using manual aggregation");
        }

        let headers = OrderRepository::new(self.pool.clone())
            .headers_in_period(start, end)
            .await?;

        Ok(daily_sales_from_orders(&headers))
    }

    /// The primary, storage-side daily sales aggregation.
    pub async fn daily_sales_native(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<DailySales>> {
        let rows: Vec<DailyRow> = sqlx::query_as(
            r#"
            SELECT strftime('%Y-%m-%d', created_at) AS day,
                   SUM(total_cents) AS total_cents
            FROM orders
            WHERE (?1 IS NULL OR created_at >= ?1)
              AND (?2 IS NULL OR created_at <= ?2)
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| DailySales {
                day: row.day,
                total: money::from_cents(row.total_cents),
            })
            .collect())
    }

    /// Quantity and revenue per product, ranked by revenue, limited.
    ///
    /// Product names come from the catalog joined by id, including the
    /// brand suffix when present, so renamed products aggregate under
    /// their current display name.
    pub async fn product_sales(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: u32,
    ) -> DbResult<Vec<ProductSales>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT CASE
                     WHEN p.brand IS NOT NULL AND p.brand != ''
                     THEN p.name || ' (' || p.brand || ')'
                     ELSE p.name
                   END AS product_name,
                   SUM(oi.quantity_milli) AS quantity_milli,
                   SUM(oi.subtotal_cents) AS total_cents
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            JOIN orders o ON o.id = oi.order_id
            WHERE (?1 IS NULL OR o.created_at >= ?1)
              AND (?2 IS NULL OR o.created_at <= ?2)
            GROUP BY p.id
            ORDER BY total_cents DESC
            LIMIT ?3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ProductSales {
                product_name: row.product_name,
                quantity: money::from_milli(row.quantity_milli),
                total: money::from_cents(row.total_cents),
            })
            .collect())
    }

    /// Revenue per payment method, ranked by revenue.
    pub async fn payment_distribution(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<PaymentDistribution>> {
        let rows: Vec<DistributionRow> = sqlx::query_as(
            r#"
            SELECT payment_method,
                   SUM(total_cents) AS total_cents
            FROM orders
            WHERE (?1 IS NULL OR created_at >= ?1)
              AND (?2 IS NULL OR created_at <= ?2)
            GROUP BY payment_method
            ORDER BY total_cents DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PaymentDistribution {
                payment_method: row.payment_method,
                total: money::from_cents(row.total_cents),
            })
            .collect())
    }

    /// Order count and mean order total per payment method.
    ///
    /// SQL produces the exact count and sum; the division and 2-decimal
    /// rounding happen here with the shared currency rounding rule.
    pub async fn ticket_average(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DbResult<Vec<TicketAverage>> {
        let rows: Vec<MethodRow> = sqlx::query_as(
            r#"
            SELECT payment_method,
                   COUNT(*) AS orders,
                   SUM(total_cents) AS total_cents
            FROM orders
            WHERE (?1 IS NULL OR created_at >= ?1)
              AND (?2 IS NULL OR created_at <= ?2)
            GROUP BY payment_method
            ORDER BY total_cents DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                // COUNT(*) in a group is always >= 1
                let average = money::round_currency(
                    money::from_cents(row.total_cents) / Decimal::from(row.orders),
                );
                TicketAverage {
                    payment_method: row.payment_method,
                    orders: row.orders,
                    average,
                }
            })
            .collect())
    }

    /// Revenue per customer, ranked, limited, optionally restricted to one
    /// payment method (the common case: ranking "fiado" debtors).
    ///
    /// Walk-in orders (no customer attached) are excluded.
    pub async fn top_customers(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        method: Option<PaymentMethod>,
        limit: u32,
    ) -> DbResult<Vec<TopCustomer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT c.name AS customer_name,
                   SUM(o.total_cents) AS total_cents
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.customer_id IS NOT NULL
              AND (?1 IS NULL OR o.created_at >= ?1)
              AND (?2 IS NULL OR o.created_at <= ?2)
              AND (?3 IS NULL OR o.payment_method = ?3)
            GROUP BY c.id
            ORDER BY total_cents DESC
            LIMIT ?4
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(method)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TopCustomer {
                customer_name: row.customer_name,
                total: money::from_cents(row.total_cents),
            })
            .collect())
    }
}

/// The explicit fallback predicate for daily sales.
///
/// Fallback triggers on error (the engine refused the query) and on an
/// empty result (indistinguishable from a useless result, and the manual
/// path answers both cases identically).
fn needs_fallback(primary: &DbResult<Vec<DailySales>>) -> bool {
    match primary {
        Ok(rows) => rows.is_empty(),
        Err(_) => true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use balcao_core::{Customer, Order, OrderItem, Product};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn seed_product(db: &Database, name: &str, brand: Option<&str>, price: &str) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            brand: brand.map(str::to_string),
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

    async fn seed_order(
        db: &Database,
        number: i64,
        day: u32,
        method: PaymentMethod,
        customer: Option<Customer>,
        product: &Product,
        qty: &str,
        price: &str,
    ) {
        let mut order = Order::new(number, method, customer);
        order.stamp_created_at(Utc.with_ymd_and_hms(2023, 5, day, 10, 0, 0).unwrap());
        order.push_item(OrderItem::new(product, dec(qty), dec(price)));
        db.orders().insert_with_items(&mut order).await.unwrap();
    }

    #[tokio::test]
    async fn test_daily_sales_groups_and_sorts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cimento = seed_product(&db, "Cimento", None, "32.90").await;

        seed_order(&db, 1, 10, PaymentMethod::Cash, None, &cimento, "1", "100.00").await;
        seed_order(&db, 2, 10, PaymentMethod::Pix, None, &cimento, "1", "50.00").await;
        seed_order(&db, 3, 12, PaymentMethod::Cash, None, &cimento, "1", "25.00").await;

        let rows = db.reports().daily_sales(None, None).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day, "2023-05-10");
        assert_eq!(rows[0].total, dec("150.00"));
        assert_eq!(rows[1].day, "2023-05-12");
        assert_eq!(rows[1].total, dec("25.00"));
    }

    #[tokio::test]
    async fn test_daily_sales_paths_agree() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let areia = seed_product(&db, "Areia", None, "120.00").await;

        seed_order(&db, 1, 3, PaymentMethod::Cash, None, &areia, "2.5", "120.00").await;
        seed_order(&db, 2, 3, PaymentMethod::Debit, None, &areia, "1", "120.00").await;
        seed_order(&db, 3, 7, PaymentMethod::Credit, None, &areia, "0.5", "120.00").await;

        let native = db.reports().daily_sales_native(None, None).await.unwrap();
        let headers = db.orders().headers_in_period(None, None).await.unwrap();
        let manual = daily_sales_from_orders(&headers);

        assert_eq!(native, manual);
    }

    #[tokio::test]
    async fn test_daily_sales_empty_range_falls_back_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let rows = db.reports().daily_sales(None, None).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_daily_sales_respects_range_bounds() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let brita = seed_product(&db, "Brita", None, "90.00").await;

        seed_order(&db, 1, 1, PaymentMethod::Cash, None, &brita, "1", "10.00").await;
        seed_order(&db, 2, 15, PaymentMethod::Cash, None, &brita, "1", "20.00").await;
        seed_order(&db, 3, 30, PaymentMethod::Cash, None, &brita, "1", "30.00").await;

        let start = Utc.with_ymd_and_hms(2023, 5, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 5, 20, 23, 59, 59).unwrap();

        let rows = db.reports().daily_sales(Some(start), Some(end)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, dec("20.00"));
    }

    #[tokio::test]
    async fn test_product_sales_ranks_by_revenue_with_display_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cimento = seed_product(&db, "Cimento CP-II", Some("Votoran"), "32.90").await;
        let tijolo = seed_product(&db, "Tijolo Baiano", None, "1.10").await;

        seed_order(&db, 1, 5, PaymentMethod::Cash, None, &cimento, "10", "32.90").await;
        seed_order(&db, 2, 6, PaymentMethod::Cash, None, &tijolo, "500", "1.10").await;

        let rows = db.reports().product_sales(None, None, 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        // 500 × 1.10 = 550.00 beats 10 × 32.90 = 329.00
        assert_eq!(rows[0].product_name, "Tijolo Baiano");
        assert_eq!(rows[0].total, dec("550.00"));
        assert_eq!(rows[1].product_name, "Cimento CP-II (Votoran)");
        assert_eq!(rows[1].quantity, dec("10.000"));
    }

    #[tokio::test]
    async fn test_product_sales_honors_limit() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let a = seed_product(&db, "A", None, "1.00").await;
        let b = seed_product(&db, "B", None, "2.00").await;
        let c = seed_product(&db, "C", None, "3.00").await;

        seed_order(&db, 1, 5, PaymentMethod::Cash, None, &a, "1", "1.00").await;
        seed_order(&db, 2, 5, PaymentMethod::Cash, None, &b, "1", "2.00").await;
        seed_order(&db, 3, 5, PaymentMethod::Cash, None, &c, "1", "3.00").await;

        let rows = db.reports().product_sales(None, None, 2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name, "C");
    }

    #[tokio::test]
    async fn test_payment_distribution_sums_per_method() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cimento = seed_product(&db, "Cimento", None, "32.90").await;

        seed_order(&db, 1, 5, PaymentMethod::Cash, None, &cimento, "1", "100.00").await;
        seed_order(&db, 2, 6, PaymentMethod::Cash, None, &cimento, "1", "60.00").await;
        seed_order(&db, 3, 7, PaymentMethod::Pix, None, &cimento, "1", "40.00").await;

        let rows = db.reports().payment_distribution(None, None).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].payment_method, PaymentMethod::Cash);
        assert_eq!(rows[0].total, dec("160.00"));
        assert_eq!(rows[1].payment_method, PaymentMethod::Pix);
        assert_eq!(rows[1].total, dec("40.00"));
    }

    #[tokio::test]
    async fn test_ticket_average_divides_exactly_and_rounds() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cimento = seed_product(&db, "Cimento", None, "32.90").await;

        seed_order(&db, 1, 5, PaymentMethod::Cash, None, &cimento, "1", "10.00").await;
        seed_order(&db, 2, 6, PaymentMethod::Cash, None, &cimento, "1", "25.00").await;
        // sum 35.02 over 3 orders = 11.673... → 11.67
        seed_order(&db, 3, 7, PaymentMethod::Cash, None, &cimento, "1", "0.02").await;

        let rows = db.reports().ticket_average(None, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orders, 3);
        assert_eq!(rows[0].average, dec("11.67"));
    }

    #[tokio::test]
    async fn test_top_customers_excludes_walk_ins_and_filters_method() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cimento = seed_product(&db, "Cimento", None, "32.90").await;
        let maria = seed_customer(&db, "Maria Silva").await;
        let joao = seed_customer(&db, "João Pedreiro").await;

        seed_order(&db, 1, 5, PaymentMethod::CreditSale, Some(maria.clone()), &cimento, "1", "200.00").await;
        seed_order(&db, 2, 6, PaymentMethod::Cash, Some(joao.clone()), &cimento, "1", "300.00").await;
        seed_order(&db, 3, 7, PaymentMethod::Cash, None, &cimento, "1", "999.00").await;

        let all = db.reports().top_customers(None, None, None, 10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].customer_name, "João Pedreiro");

        let fiado = db
            .reports()
            .top_customers(None, None, Some(PaymentMethod::CreditSale), 10)
            .await
            .unwrap();
        assert_eq!(fiado.len(), 1);
        assert_eq!(fiado[0].customer_name, "Maria Silva");
        assert_eq!(fiado[0].total, dec("200.00"));
    }

    #[test]
    fn test_needs_fallback_predicate() {
        assert!(needs_fallback(&Ok(vec![])));
        assert!(needs_fallback(&Err(DbError::QueryFailed("boom".into()))));

        let rows = vec![DailySales {
            day: "2023-05-10".to_string(),
            total: Decimal::new(100, 2),
        }];
        assert!(!needs_fallback(&Ok(rows)));
    }
}
