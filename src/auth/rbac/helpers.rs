//! Helpers shared by the RBAC services

use crate::utils::error::{ApiError, Result};

/// Map a missing row to `NotFound`
pub(super) fn found<T>(value: Option<T>, what: &str, id: i32) -> Result<T> {
    value.ok_or_else(|| ApiError::not_found(format!("{} {} not found", what, id)))
}

/// Map a `false` mutation result to `NotFound`
pub(super) fn affected(changed: bool, message: impl Into<String>) -> Result<()> {
    if changed {
        Ok(())
    } else {
        Err(ApiError::not_found(message))
    }
}
