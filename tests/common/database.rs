//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite instance with migrations applied.

use rbac_api::config::DatabaseConfig;
use rbac_api::storage::database::Database;
use rbac_api::storage::{Repositories, StorageLayer};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    pub async fn new() -> Self {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// The four repositories over this database
    pub fn repositories(&self) -> Repositories {
        Repositories::from_store(Arc::clone(&self.inner))
    }

    /// Storage layer over this database
    pub fn storage(&self) -> StorageLayer {
        StorageLayer::from_database(Arc::clone(&self.inner))
    }
}

/// Config for an in-memory SQLite database
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
        enabled: true,
    }
}
