//! # Customer Commands
//!
//! Customer CRUD. The create-or-find flow used by order creation lives in
//! [`crate::commands::order`]; these commands back the customer management
//! screen.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::{debug, info};
use uuid::Uuid;

use balcao_core::validation::validate_customer_name;
use balcao_core::Customer;

use crate::error::ApiError;
use crate::state::DbState;

/// Payload for creating or updating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub phone: Option<String>,
}

impl CustomerInput {
    fn parse(self) -> Result<(String, Option<String>), ApiError> {
        let name = validate_customer_name(&self.name).map_err(balcao_core::CoreError::from)?;

        let phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok((name, phone))
    }
}

#[tauri::command]
pub async fn list_customers(db: State<'_, DbState>) -> Result<Vec<Customer>, ApiError> {
    debug!("list_customers command");
    Ok(db.database().customers().list().await?)
}

/// Exact-name lookup used by the payment dialog to show whether the typed
/// name matches an existing customer.
#[tauri::command]
pub async fn find_customer_by_name(
    db: State<'_, DbState>,
    name: String,
) -> Result<Option<Customer>, ApiError> {
    debug!(name = %name, "find_customer_by_name command");

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(db.database().customers().get_by_name(trimmed).await?)
}

#[tauri::command]
pub async fn create_customer(
    db: State<'_, DbState>,
    input: CustomerInput,
) -> Result<Customer, ApiError> {
    debug!(name = %input.name, "create_customer command");

    let (name, phone) = input.parse()?;
    let now = Utc::now();

    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name,
        phone,
        created_at: now,
        updated_at: now,
    };

    db.database().customers().insert(&customer).await?;

    info!(id = %customer.id, name = %customer.name, "Customer created");
    Ok(customer)
}

#[tauri::command]
pub async fn update_customer(
    db: State<'_, DbState>,
    id: String,
    input: CustomerInput,
) -> Result<Customer, ApiError> {
    debug!(id = %id, "update_customer command");

    let (name, phone) = input.parse()?;

    let mut customer = db
        .database()
        .customers()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", &id))?;

    customer.name = name;
    customer.phone = phone;

    db.database().customers().update(&customer).await?;

    info!(id = %customer.id, "Customer updated");
    Ok(customer)
}

#[tauri::command]
pub async fn delete_customer(db: State<'_, DbState>, id: String) -> Result<(), ApiError> {
    debug!(id = %id, "delete_customer command");

    db.database().customers().delete(&id).await?;

    info!(id = %id, "Customer deleted");
    Ok(())
}
