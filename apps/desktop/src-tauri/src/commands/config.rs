//! # Configuration Commands
//!
//! Read-only lookups the frontend needs at startup: the effective
//! configuration and the payment-method label table for dropdowns.

use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use balcao_core::PaymentMethod;

use crate::error::ApiError;
use crate::state::ConfigState;

/// One entry of the payment-method dropdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodOption {
    /// Wire value, e.g. `credit_sale`
    pub value: PaymentMethod,
    /// Display label, e.g. "Fiado"
    pub label: String,
}

#[tauri::command]
pub async fn get_config(config: State<'_, ConfigState>) -> Result<ConfigState, ApiError> {
    debug!("get_config command");
    Ok(config.inner().clone())
}

#[tauri::command]
pub async fn payment_methods() -> Result<Vec<PaymentMethodOption>, ApiError> {
    debug!("payment_methods command");

    Ok(PaymentMethod::ALL
        .iter()
        .map(|&method| PaymentMethodOption {
            value: method,
            label: method.label().to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_method_has_an_option() {
        let options: Vec<PaymentMethodOption> = PaymentMethod::ALL
            .iter()
            .map(|&method| PaymentMethodOption {
                value: method,
                label: method.label().to_string(),
            })
            .collect();

        assert_eq!(options.len(), PaymentMethod::ALL.len());
        assert!(options.iter().any(|o| o.label == "Fiado"));
        assert!(options.iter().any(|o| o.label == "PIX"));
    }
}
