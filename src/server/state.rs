//! Application state shared across HTTP handlers

use crate::auth::{JwtHandler, RbacSystem};
use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every actix worker; all fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer the RBAC services run on
    pub storage: StorageLayer,
    /// Directory, catalogs, assignment graph and evaluator
    pub rbac: RbacSystem,
    /// Token issuing and verification
    pub jwt: Arc<JwtHandler>,
}

impl AppState {
    /// Wire the RBAC services and the JWT handler over a storage layer
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let rbac = RbacSystem::new(storage.repositories(), &config.rbac);
        let jwt = JwtHandler::new(&config.auth);

        Self {
            config: Arc::new(config),
            storage,
            rbac,
            jwt: Arc::new(jwt),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
