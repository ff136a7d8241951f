//! # Balcão Desktop Library
//!
//! Core library for the Balcão POS desktop application.
//! This is the main entry point that configures and runs the Tauri app.
//!
//! ## Module Organization
//! ```text
//! balcao_desktop_lib/
//! ├── lib.rs          ◄─── You are here (Tauri setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── cart.rs     ◄─── Cart state management
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Product catalog commands
//! │   ├── customer.rs ◄─── Customer commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── order.rs    ◄─── Order creation, history, CSV export
//! │   ├── report.rs   ◄─── Sales report commands
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tauri::Manager;
use tracing::info;
use tracing_subscriber::EnvFilter;

use balcao_db::{Database, DbConfig};
use state::{CartState, ConfigState, DbState};

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Determine Database Path ──────────────────────────────────────────► │
/// │     • macOS: ~/Library/Application Support/com.balcao.pos/balcao.db     │
/// │     • Windows: %APPDATA%\balcao\pos\balcao.db                           │
/// │     • Linux: ~/.local/share/balcao-pos/balcao.db                        │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • DbState: Wraps Database connection                                │
/// │     • CartState: Empty cart with Mutex for thread-safe updates          │
/// │     • ConfigState: Defaults plus environment overrides                  │
/// │                                                                         │
/// │  5. Build & Run Tauri App ────────────────────────────────────────────► │
/// │     • Register all commands                                             │
/// │     • Manage state                                                      │
/// │     • Launch window                                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    init_tracing();

    info!("Starting Balcão POS Desktop Application");

    tauri::Builder::default()
        .setup(|app| {
            let db_path = get_database_path(app)?;
            info!(?db_path, "Database path determined");

            // Initialize database (blocking in setup, async in runtime)
            let db = tauri::async_runtime::block_on(async {
                let config = DbConfig::new(db_path);
                Database::new(config).await
            })?;

            info!("Database connected and migrations applied");

            let db_state = DbState::new(db);
            let cart_state = CartState::new();
            let config_state = ConfigState::from_env();

            app.manage(db_state);
            app.manage(cart_state);
            app.manage(config_state);

            info!("State initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Product commands
            commands::product::list_products,
            commands::product::get_product,
            commands::product::create_product,
            commands::product::update_product,
            commands::product::delete_product,
            // Customer commands
            commands::customer::list_customers,
            commands::customer::find_customer_by_name,
            commands::customer::create_customer,
            commands::customer::update_customer,
            commands::customer::delete_customer,
            // Cart commands
            commands::cart::get_cart,
            commands::cart::add_to_cart,
            commands::cart::update_cart_item,
            commands::cart::remove_from_cart,
            commands::cart::clear_cart,
            // Order commands
            commands::order::next_order_number,
            commands::order::create_order,
            commands::order::order_history,
            commands::order::export_history_csv,
            // Report commands
            commands::report::daily_sales,
            commands::report::product_sales,
            commands::report::payment_distribution,
            commands::report::ticket_average,
            commands::report::top_customers,
            // Config commands
            commands::config::get_config,
            commands::config::payment_methods,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=balcao=trace` - Show trace for balcao crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,balcao=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.balcao.pos/balcao.db`
/// - **Windows**: `%APPDATA%\balcao\pos\balcao.db`
/// - **Linux**: `~/.local/share/balcao-pos/balcao.db`
///
/// ## Development Override
/// Set `BALCAO_DB_PATH` environment variable to use a custom path.
fn get_database_path(_app: &tauri::App) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("BALCAO_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "balcao", "pos")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("balcao.db"))
}
