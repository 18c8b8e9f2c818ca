//! Principal types

use crate::core::models::Role;
use crate::utils::error::Result;
use crate::utils::validation::DataValidator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    /// Normalized email address (unique)
    pub email: String,
    pub name: String,
    /// Password hash, never returned to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Copy of this user with the credential hash cleared
    pub fn sanitized(mut self) -> Self {
        self.password_hash.clear();
        self
    }
}

/// Fields of a user row about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        DataValidator::validate_email(&self.email)?;
        DataValidator::validate_password(&self.password)?;
        DataValidator::validate_user_name(&self.name)
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        DataValidator::validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(crate::utils::error::ApiError::validation(
                "Password is required",
            ));
        }
        Ok(())
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
    pub user: User,
    pub roles: Vec<Role>,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            DataValidator::validate_user_name(name)?;
        }
        if let Some(email) = &self.email {
            DataValidator::validate_email(email)?;
        }
        Ok(())
    }
}
