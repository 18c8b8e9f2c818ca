//! Utility modules for the RBAC service
//!
//! - **error**: Error taxonomy and HTTP error envelope
//! - **validation**: Stateless request validation

pub mod error;
pub mod validation;

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Normalize a case-insensitive key (trim + lowercase)
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}
