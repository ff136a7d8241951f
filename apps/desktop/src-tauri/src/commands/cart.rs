//! # Cart Commands
//!
//! Manipulate the in-progress order before it is finalized. All quantities
//! and price overrides arrive as decimal strings and are validated at this
//! boundary; the cart itself never clamps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use balcao_core::validation::{validate_quantity, validate_unit_price};

use crate::error::ApiError;
use crate::state::{CartState, CartView, DbState};

/// Payload for adding a product to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub product_id: String,
    /// Decimal string, e.g. "2.5"
    pub quantity: String,
    /// Optional price override; defaults to the catalog price.
    pub unit_price: Option<String>,
}

#[tauri::command]
pub async fn get_cart(cart: State<'_, CartState>) -> Result<CartView, ApiError> {
    Ok(cart.with_cart(CartView::from))
}

#[tauri::command]
pub async fn add_to_cart(
    db: State<'_, DbState>,
    cart: State<'_, CartState>,
    input: AddToCartInput,
) -> Result<CartView, ApiError> {
    debug!(product_id = %input.product_id, quantity = %input.quantity, "add_to_cart command");

    let quantity: Decimal = input
        .quantity
        .parse()
        .map_err(|_| ApiError::validation("quantity must be a decimal number"))?;
    validate_quantity(quantity).map_err(balcao_core::CoreError::from)?;

    let product = db
        .database()
        .products()
        .get_by_id(&input.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &input.product_id))?;

    // Counter price override: the clerk may negotiate a different price
    let unit_price = match input.unit_price {
        Some(raw) => {
            let price: Decimal = raw
                .parse()
                .map_err(|_| ApiError::validation("unit price must be a decimal number"))?;
            validate_unit_price(price).map_err(balcao_core::CoreError::from)?;
            price
        }
        None => product.price,
    };

    Ok(cart.with_cart_mut(|c| {
        c.add_item(&product, quantity, unit_price);
        CartView::from(&*c)
    }))
}

#[tauri::command]
pub async fn update_cart_item(
    cart: State<'_, CartState>,
    item_id: String,
    quantity: String,
) -> Result<CartView, ApiError> {
    debug!(item_id = %item_id, quantity = %quantity, "update_cart_item command");

    let quantity: Decimal = quantity
        .parse()
        .map_err(|_| ApiError::validation("quantity must be a decimal number"))?;
    if !quantity.is_zero() {
        validate_quantity(quantity).map_err(balcao_core::CoreError::from)?;
    }

    cart.with_cart_mut(|c| {
        if c.update_quantity(&item_id, quantity) {
            Ok(CartView::from(&*c))
        } else {
            Err(ApiError::cart(format!("Item {} not in cart", item_id)))
        }
    })
}

#[tauri::command]
pub async fn remove_from_cart(
    cart: State<'_, CartState>,
    item_id: String,
) -> Result<CartView, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        if c.remove_item(&item_id) {
            Ok(CartView::from(&*c))
        } else {
            Err(ApiError::cart(format!("Item {} not in cart", item_id)))
        }
    })
}

#[tauri::command]
pub async fn clear_cart(cart: State<'_, CartState>) -> Result<CartView, ApiError> {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        Ok(CartView::from(&*c))
    })
}
