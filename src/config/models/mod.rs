//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

pub mod auth;
pub mod rbac;
pub mod server;
pub mod storage;

pub use auth::*;
pub use rbac::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_database_url() -> String {
    "sqlite://data/rbac.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

pub fn default_admin_role() -> String {
    "admin".to_string()
}

pub fn default_decision_timeout_ms() -> u64 {
    5000
}

pub(crate) fn default_true() -> bool {
    true
}
