//! Storage layer for the RBAC service
//!
//! A sea-orm database when `storage.database.enabled`, otherwise the
//! in-memory store. Either way callers only see [`Repositories`].

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;

use crate::config::StorageConfig;
use crate::core::traits::{PermissionRepository, RbacRepository, RoleRepository, UserRepository};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use database::SeaOrmDatabase;
pub use memory::MemoryStore;

/// The four repository capabilities, usually backed by one store
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub permissions: Arc<dyn PermissionRepository>,
    pub rbac: Arc<dyn RbacRepository>,
}

impl Repositories {
    /// Share one store across all four capabilities
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + RoleRepository + PermissionRepository + RbacRepository + 'static,
    {
        Self {
            users: store.clone(),
            roles: store.clone(),
            permissions: store.clone(),
            rbac: store,
        }
    }

    /// Fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
enum Backend {
    Database(Arc<SeaOrmDatabase>),
    Memory,
}

/// Main storage layer owning the configured backend
#[derive(Debug, Clone)]
pub struct StorageLayer {
    backend: Backend,
    repositories: Repositories,
}

impl StorageLayer {
    /// Create a new storage layer, running migrations on a database backend
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        if !config.database.enabled {
            warn!("Database disabled, using in-memory storage; data will not persist");
            return Ok(Self::memory());
        }

        debug!("Connecting to database");
        let database = Arc::new(SeaOrmDatabase::new(&config.database).await?);
        database.migrate().await?;

        info!("Storage layer initialized successfully");
        Ok(Self {
            repositories: Repositories::from_store(database.clone()),
            backend: Backend::Database(database),
        })
    }

    /// In-memory storage layer
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            repositories: Repositories::in_memory(),
        }
    }

    /// Storage layer over an existing database handle
    pub fn from_database(database: Arc<SeaOrmDatabase>) -> Self {
        Self {
            repositories: Repositories::from_store(database.clone()),
            backend: Backend::Database(database),
        }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    /// Name of the active backend, as reported by `/health`
    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Database(db) => match db.backend_type() {
                database::DatabaseBackendType::SQLite => "sqlite",
                database::DatabaseBackendType::PostgreSQL => "postgres",
            },
            Backend::Memory => "memory",
        }
    }

    /// Health check for the active backend
    pub async fn health_check(&self) -> Result<()> {
        match &self.backend {
            Backend::Database(db) => db.health_check().await,
            Backend::Memory => Ok(()),
        }
    }
}
