//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::error::{ApiError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Minimum length accepted for the HS256 signing secret
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Validation trait for configuration sections
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err(ApiError::Config("Server host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ApiError::Config(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(ApiError::Config(
                    "Worker count must be greater than 0".to_string(),
                ));
            }
        }

        if self.timeout == 0 {
            return Err(ApiError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_body_size == 0 {
            return Err(ApiError::Config(
                "Max body size must be greater than 0".to_string(),
            ));
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.allow_credentials && self.allows_all_origins() {
            return Err(ApiError::Config(
                "CORS cannot allow credentials while allowing all origins".to_string(),
            ));
        }

        for method in &self.allowed_methods {
            if method.parse::<actix_web::http::Method>().is_err() {
                return Err(ApiError::Config(format!(
                    "Invalid CORS method: {}",
                    method
                )));
            }
        }

        self.warn_if_permissive();
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating storage configuration");
        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.url.is_empty() {
            return Err(ApiError::Config("Database URL cannot be empty".to_string()));
        }

        if !self.is_sqlite() && !self.is_postgres() {
            return Err(ApiError::Config(format!(
                "Unsupported database URL scheme: {}",
                self.url.split(':').next().unwrap_or_default()
            )));
        }

        if self.max_connections == 0 {
            return Err(ApiError::Config(
                "Database max connections must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating auth configuration");

        if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ApiError::Config(format!(
                "JWT secret must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        if self.jwt_expiration == 0 {
            return Err(ApiError::Config(
                "JWT expiration must be greater than 0".to_string(),
            ));
        }

        if self.jwt_expiration > 86400 * 30 {
            warn!("JWT expiration exceeds 30 days");
        }

        Ok(())
    }
}

impl Validate for RbacConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating RBAC configuration");

        if self.admin_role.trim().is_empty() {
            return Err(ApiError::Config("Admin role cannot be empty".to_string()));
        }

        if let Some(role) = &self.default_role {
            if role.trim().is_empty() {
                return Err(ApiError::Config(
                    "Default role cannot be blank".to_string(),
                ));
            }
        }

        if self.decision_timeout_ms == 0 {
            return Err(ApiError::Config(
                "Decision timeout must be greater than 0".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut pairs = HashSet::new();
        for seed in &self.seed_permissions {
            if seed.name.trim().is_empty()
                || seed.resource.trim().is_empty()
                || seed.action.trim().is_empty()
            {
                return Err(ApiError::Config(format!(
                    "Seed permission '{}' must have a name, resource and action",
                    seed.name
                )));
            }
            if !names.insert(seed.name.trim().to_lowercase()) {
                return Err(ApiError::Config(format!(
                    "Duplicate seed permission name: {}",
                    seed.name
                )));
            }
            let pair = (
                seed.resource.trim().to_lowercase(),
                seed.action.trim().to_lowercase(),
            );
            if !pairs.insert(pair) {
                return Err(ApiError::Config(format!(
                    "Duplicate seed permission resource/action: {}:{}",
                    seed.resource, seed.action
                )));
            }
        }

        Ok(())
    }
}
