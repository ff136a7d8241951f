//! # Sales Report Projections
//!
//! Row types for the five report projections, date-range normalization, and
//! the manual daily-sales aggregation used as the fallback path when the
//! storage engine cannot run the pre-aggregated query.
//!
//! ## Two-Path Daily Sales
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Daily Sales Strategy                                 │
//! │                                                                         │
//! │  Report request [start, end]                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PRIMARY: storage GROUP BY calendar day  ──► rows? ──► return them     │
//! │       │                                                                 │
//! │       │  error OR zero rows                                            │
//! │       ▼                                                                 │
//! │  FALLBACK: fetch raw order headers in range                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  daily_sales_from_orders() ← THIS MODULE                               │
//! │    • skip headers missing created_at or total                          │
//! │    • bucket by calendar day (BTreeMap → ascending)                     │
//! │    • exact-decimal sums                                                │
//! │                                                                         │
//! │  Both paths produce identical {day, total} rows; callers cannot        │
//! │  tell which one executed except by timing.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The orchestration (try primary, inspect, fall back) lives in the report
//! repository in `balcao-db`; the pure aggregation lives here so it is
//! testable without a database.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::PaymentMethod;

// =============================================================================
// Report Row Types
// =============================================================================

/// Total revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySales {
    /// ISO calendar date, `YYYY-MM-DD`.
    pub day: String,

    /// Exact-decimal revenue for that day.
    #[ts(as = "String")]
    pub total: Decimal,
}

/// Quantity and revenue for one product, ranked by revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSales {
    /// Display name, `name (brand)` when the product has a brand.
    pub product_name: String,

    #[ts(as = "String")]
    pub quantity: Decimal,

    #[ts(as = "String")]
    pub total: Decimal,
}

/// Revenue for one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentDistribution {
    pub payment_method: PaymentMethod,

    #[ts(as = "String")]
    pub total: Decimal,
}

/// Order count and mean order total for one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TicketAverage {
    pub payment_method: PaymentMethod,

    /// Number of orders with this payment method in scope.
    pub orders: i64,

    /// Mean order total, rounded to 2 decimal places.
    #[ts(as = "String")]
    pub average: Decimal,
}

/// Revenue for one customer, ranked by revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopCustomer {
    pub customer_name: String,

    #[ts(as = "String")]
    pub total: Decimal,
}

/// A minimal order projection for the fallback aggregation.
///
/// The fallback only needs when an order happened and what it was worth;
/// the storage layer feeds persisted headers without hydrating items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHeader {
    pub created_at: Option<DateTime<Utc>>,
    pub total: Option<Decimal>,
}

// =============================================================================
// Date-Range Normalization
// =============================================================================

/// Normalizes optional day bounds to an inclusive timestamp range.
///
/// `start` becomes start-of-day and `end` becomes end-of-day
/// (23:59:59.999999999), so a single calendar day query covers the full
/// day regardless of the orders' time-of-day components. Either bound may
/// be `None`, meaning unbounded on that side.
pub fn day_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let start = start.map(|d| NaiveDateTime::new(d, NaiveTime::MIN).and_utc());
    let end = end.map(|d| {
        let last_nanosecond = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .expect("end-of-day is a valid time");
        NaiveDateTime::new(d, last_nanosecond).and_utc()
    });
    (start, end)
}

// =============================================================================
// Fallback Aggregation
// =============================================================================

/// Aggregates raw order headers into per-day revenue totals.
///
/// This is the manual counterpart of the storage layer's GROUP-BY-day query
/// and must reproduce its semantics exactly: calendar-day bucketing of the
/// creation timestamp, exact-decimal summation, ascending day order.
///
/// Headers missing either the creation timestamp or the total are skipped
/// entirely (not counted as zero). An empty input yields an empty result.
pub fn daily_sales_from_orders(headers: &[OrderHeader]) -> Vec<DailySales> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for header in headers {
        let (Some(created_at), Some(total)) = (header.created_at, header.total) else {
            continue;
        };
        *by_day.entry(created_at.date_naive()).or_insert(Decimal::ZERO) += total;
    }

    by_day
        .into_iter()
        .map(|(day, total)| DailySales {
            day: day.format("%Y-%m-%d").to_string(),
            total,
        })
        .collect()
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

    fn header(ts: &str, total: &str) -> OrderHeader {
        OrderHeader {
            created_at: Some(ts.parse().unwrap()),
            total: Some(dec(total)),
        }
    }

    #[test]
    fn test_day_range_normalizes_to_full_days() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 20).unwrap();

        let (s, e) = day_range(Some(start), Some(end));
        assert_eq!(s.unwrap(), Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap());

        let e = e.unwrap();
        assert_eq!(e.date_naive(), end);
        assert_eq!(e.format("%H:%M:%S%.9f").to_string(), "23:59:59.999999999");
    }

    #[test]
    fn test_day_range_open_bounds() {
        let (s, e) = day_range(None, None);
        assert!(s.is_none());
        assert!(e.is_none());
    }

    #[test]
    fn test_daily_sales_groups_by_calendar_day() {
        let headers = vec![
            header("2023-01-15T09:30:00Z", "100.00"),
            header("2023-01-15T18:45:00Z", "50.00"),
        ];

        let result = daily_sales_from_orders(&headers);
        assert_eq!(
            result,
            vec![DailySales {
                day: "2023-01-15".to_string(),
                total: dec("150.00"),
            }]
        );
    }

    #[test]
    fn test_daily_sales_sorted_ascending_by_day() {
        let headers = vec![
            header("2023-02-03T12:00:00Z", "30.00"),
            header("2023-01-28T12:00:00Z", "10.00"),
            header("2023-02-01T12:00:00Z", "20.00"),
        ];

        let days: Vec<String> = daily_sales_from_orders(&headers)
            .into_iter()
            .map(|r| r.day)
            .collect();
        assert_eq!(days, vec!["2023-01-28", "2023-02-01", "2023-02-03"]);
    }

    #[test]
    fn test_daily_sales_skips_incomplete_headers() {
        let headers = vec![
            header("2023-01-15T09:30:00Z", "100.00"),
            OrderHeader {
                created_at: None,
                total: Some(dec("999.00")),
            },
            OrderHeader {
                created_at: Some("2023-01-15T10:00:00Z".parse().unwrap()),
                total: None,
            },
        ];

        let result = daily_sales_from_orders(&headers);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total, dec("100.00"));
    }

    #[test]
    fn test_daily_sales_empty_input_is_empty_result() {
        assert!(daily_sales_from_orders(&[]).is_empty());
    }

    #[test]
    fn test_daily_sales_sums_are_exact() {
        let headers = vec![
            header("2023-03-01T08:00:00Z", "0.10"),
            header("2023-03-01T09:00:00Z", "0.20"),
        ];
        assert_eq!(daily_sales_from_orders(&headers)[0].total, dec("0.30"));
    }
}
