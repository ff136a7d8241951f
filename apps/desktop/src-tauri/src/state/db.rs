//! # Database State
//!
//! Wraps the `Database` connection for use in Tauri commands.
//!
//! ## Thread Safety
//! The `Database` struct from `balcao-db` contains a `SqlitePool` which
//! is inherently thread-safe. Multiple commands can execute queries
//! concurrently without explicit locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! #[tauri::command]
//! async fn list_products(
//!     db: State<'_, DbState>,
//! ) -> Result<Vec<Product>, ApiError> {
//!     Ok(db.database().products().list().await?)
//! }
//! ```

use balcao_db::Database;

/// Wrapper around `Database` for Tauri state management.
///
/// ## Why a Wrapper?
/// Tauri's state management requires types to implement `Send + Sync`.
/// This wrapper makes the intent explicit and provides a clean API
/// for accessing the database in commands.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the wrapped Database.
    ///
    /// Named `database` rather than `inner` so calls through Tauri's
    /// `State<'_, DbState>` are unambiguous (`State` has its own `inner`).
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balcao_db::DbConfig;

    /// Commands reach repositories through `database()`; Tauri's `State`
    /// wrapper contributes its own `inner()`, so every repository call
    /// chain must go through this accessor.
    #[tokio::test]
    async fn test_database_accessor_reaches_repositories() {
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database");
        let state = DbState::new(db);

        let products = state.database().products().list().await.unwrap();
        assert!(products.is_empty());

        let max = state.database().orders().max_number().await.unwrap();
        assert_eq!(max, None);
    }
}
