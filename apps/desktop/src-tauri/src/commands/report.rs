//! # Report Commands
//!
//! The five sales-report aggregations behind the reports screen. Each
//! command takes optional `YYYY-MM-DD` bounds; an absent bound leaves that
//! side of the range open. Ranked reports accept an optional row limit and
//! fall back to the configured default.

use tauri::State;
use tracing::debug;

use balcao_core::reports::{
    day_range, DailySales, PaymentDistribution, ProductSales, TicketAverage, TopCustomer,
};
use balcao_core::PaymentMethod;

use crate::commands::parse_day;
use crate::error::ApiError;
use crate::state::{ConfigState, DbState};

#[tauri::command]
pub async fn daily_sales(
    db: State<'_, DbState>,
    start: Option<String>,
    end: Option<String>,
) -> Result<Vec<DailySales>, ApiError> {
    debug!(?start, ?end, "daily_sales command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);
    Ok(db.database().reports().daily_sales(start, end).await?)
}

#[tauri::command]
pub async fn product_sales(
    db: State<'_, DbState>,
    config: State<'_, ConfigState>,
    start: Option<String>,
    end: Option<String>,
    limit: Option<u32>,
) -> Result<Vec<ProductSales>, ApiError> {
    debug!(?start, ?end, ?limit, "product_sales command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);
    let limit = limit.unwrap_or(config.report_limit);
    Ok(db.database().reports().product_sales(start, end, limit).await?)
}

#[tauri::command]
pub async fn payment_distribution(
    db: State<'_, DbState>,
    start: Option<String>,
    end: Option<String>,
) -> Result<Vec<PaymentDistribution>, ApiError> {
    debug!(?start, ?end, "payment_distribution command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);
    Ok(db.database().reports().payment_distribution(start, end).await?)
}

#[tauri::command]
pub async fn ticket_average(
    db: State<'_, DbState>,
    start: Option<String>,
    end: Option<String>,
) -> Result<Vec<TicketAverage>, ApiError> {
    debug!(?start, ?end, "ticket_average command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);
    Ok(db.database().reports().ticket_average(start, end).await?)
}

#[tauri::command]
pub async fn top_customers(
    db: State<'_, DbState>,
    config: State<'_, ConfigState>,
    start: Option<String>,
    end: Option<String>,
    method: Option<PaymentMethod>,
    limit: Option<u32>,
) -> Result<Vec<TopCustomer>, ApiError> {
    debug!(?start, ?end, ?method, ?limit, "top_customers command");

    let (start, end) = day_range(parse_day("start", start)?, parse_day("end", end)?);
    let limit = limit.unwrap_or(config.report_limit);
    Ok(db
        .database()
        .reports()
        .top_customers(start, end, method, limit)
        .await?)
}
