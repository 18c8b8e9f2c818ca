//! Request validation utilities
//!
//! Stateless checks applied at the HTTP boundary before any store call.

use crate::utils::error::{ApiError, Result};
use once_cell::sync::Lazy;
use regex::Regex;


static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USER_NAME_LENGTH: usize = 2;

/// Data validation utilities
pub struct DataValidator;

impl DataValidator {
    /// Validate email shape
    pub fn validate_email(email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::Validation("Email cannot be empty".to_string()));
        }

        let regex = EMAIL_REGEX
            .as_ref()
            .ok_or_else(|| ApiError::Internal("Email regex failed to compile".to_string()))?;

        if !regex.is_match(email) {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }

        Ok(())
    }

    /// Validate password length
    pub fn validate_password(password: &str) -> Result<()> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Validate a user's display name
    pub fn validate_user_name(name: &str) -> Result<()> {
        Self::validate_length("name", name, MIN_USER_NAME_LENGTH, 255)
    }

    /// Validate that a trimmed field is within `min..=max` characters
    pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
        let len = value.trim().chars().count();
        if len < min {
            return Err(ApiError::Validation(format!(
                "{} must be at least {} characters",
                field, min
            )));
        }
        if len > max {
            return Err(ApiError::Validation(format!(
                "{} cannot exceed {} characters",
                field, max
            )));
        }
        Ok(())
    }

    /// Validate an optional free-text field's upper bound
    pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<()> {
        if value.chars().count() > max {
            return Err(ApiError::Validation(format!(
                "{} cannot exceed {} characters",
                field, max
            )));
        }
        Ok(())
    }

    /// Validate an entity id
    pub fn validate_id(field: &str, id: i32) -> Result<()> {
        if id <= 0 {
            return Err(ApiError::Validation(format!(
                "{} must be greater than 0",
                field
            )));
        }
        Ok(())
    }
}
