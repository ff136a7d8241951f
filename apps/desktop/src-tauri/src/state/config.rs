//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BALCAO_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use serde::{Deserialize, Serialize};

use balcao_core::DEFAULT_REPORT_LIMIT;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (displayed in the window title bar and on exports)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Default number of rows for ranked reports (top products/customers)
    pub report_limit: u32,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Depósito Central"
    /// - Currency: BRL (R$)
    /// - Report limit: 10 rows
    fn default() -> Self {
        ConfigState {
            store_name: "Depósito Central".to_string(),
            currency_symbol: "R$".to_string(),
            report_limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BALCAO_STORE_NAME`: Override store name
    /// - `BALCAO_REPORT_LIMIT`: Override ranked-report row limit
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(store_name) = std::env::var("BALCAO_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(limit_str) = std::env::var("BALCAO_REPORT_LIMIT") {
            if let Ok(limit) = limit_str.parse::<u32>() {
                config.report_limit = limit;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigState::default();
        assert_eq!(config.currency_symbol, "R$");
        assert_eq!(config.report_limit, DEFAULT_REPORT_LIMIT);
    }
}
