//! # Product Commands
//!
//! Catalog CRUD exposed to the frontend. Prices arrive as decimal strings
//! and are parsed to exact decimals before they touch the domain.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::{debug, info};
use uuid::Uuid;

use balcao_core::validation::{validate_product_name, validate_unit_price};
use balcao_core::Product;

use crate::error::ApiError;
use crate::state::DbState;

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub brand: Option<String>,
    pub unit: String,
    /// Decimal string, e.g. "32.90"
    pub price: String,
}

impl ProductInput {
    fn parse(self) -> Result<(String, Option<String>, String, Decimal), ApiError> {
        let name = validate_product_name(&self.name).map_err(balcao_core::CoreError::from)?;

        let price: Decimal = self
            .price
            .parse()
            .map_err(|_| ApiError::validation("price must be a decimal number"))?;
        validate_unit_price(price).map_err(balcao_core::CoreError::from)?;

        let brand = self
            .brand
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        let unit = self.unit.trim().to_string();
        if unit.is_empty() {
            return Err(ApiError::validation("unit is required"));
        }

        Ok((name, brand, unit, price))
    }
}

#[tauri::command]
pub async fn list_products(db: State<'_, DbState>) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    Ok(db.database().products().list().await?)
}

#[tauri::command]
pub async fn get_product(db: State<'_, DbState>, id: String) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");

    db.database()
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))
}

#[tauri::command]
pub async fn create_product(
    db: State<'_, DbState>,
    input: ProductInput,
) -> Result<Product, ApiError> {
    debug!(name = %input.name, "create_product command");

    let (name, brand, unit, price) = input.parse()?;
    let now = Utc::now();

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name,
        brand,
        unit,
        price,
        created_at: now,
        updated_at: now,
    };

    db.database().products().insert(&product).await?;

    info!(id = %product.id, name = %product.name, "Product created");
    Ok(product)
}

#[tauri::command]
pub async fn update_product(
    db: State<'_, DbState>,
    id: String,
    input: ProductInput,
) -> Result<Product, ApiError> {
    debug!(id = %id, "update_product command");

    let (name, brand, unit, price) = input.parse()?;

    let mut product = db
        .database()
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    product.name = name;
    product.brand = brand;
    product.unit = unit;
    product.price = price;

    db.database().products().update(&product).await?;

    info!(id = %product.id, "Product updated");
    Ok(product)
}

#[tauri::command]
pub async fn delete_product(db: State<'_, DbState>, id: String) -> Result<(), ApiError> {
    debug!(id = %id, "delete_product command");

    db.database().products().delete(&id).await?;

    info!(id = %id, "Product deleted");
    Ok(())
}
