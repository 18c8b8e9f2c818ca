//! Principal directory

use super::helpers::{affected, found};
use crate::auth::password::{hash_password, verify_password};
use crate::core::models::{NewUser, RegisterRequest, UpdateUserRequest, User};
use crate::core::traits::UserRepository;
use crate::utils::error::{ApiError, Result};
use crate::utils::normalize_key;
use std::sync::Arc;
use tracing::{debug, info};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Owns user identity records
#[derive(Clone)]
pub struct PrincipalDirectory {
    users: Arc<dyn UserRepository>,
}

impl PrincipalDirectory {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a principal from an already hashed credential
    pub async fn create(&self, email: &str, password_hash: String, name: &str) -> Result<User> {
        let email = normalize_key(email);

        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(ApiError::conflict(format!(
                "Email already registered: {}",
                email
            )));
        }

        let user = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                name: name.trim().to_string(),
            })
            .await?;

        info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Hash the password and create the principal
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let password_hash = hash_password(&request.password)?;
        self.create(&request.email, password_hash, &request.name)
            .await
    }

    /// Check credentials without revealing which half was wrong
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_key(email);

        let Some(user) = self.users.find_user_by_email(&email).await? else {
            debug!("Login attempt for unknown email");
            return Err(ApiError::auth(INVALID_CREDENTIALS));
        };

        if !verify_password(password, &user.password_hash)? {
            debug!("Login attempt with wrong password for user {}", user.id);
            return Err(ApiError::auth(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    pub async fn get(&self, id: i32) -> Result<User> {
        found(self.users.find_user(id).await?, "User", id)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        let email = normalize_key(email);
        self.users
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("User with email {} not found", email)))
    }

    /// Apply a partial update, re-checking email uniqueness against everyone else
    pub async fn update(&self, id: i32, changes: UpdateUserRequest) -> Result<User> {
        self.get(id).await?;

        let changes = UpdateUserRequest {
            name: changes.name.map(|name| name.trim().to_string()),
            email: changes.email.map(|email| normalize_key(&email)),
        };

        if let Some(email) = &changes.email {
            if let Some(owner) = self.users.find_user_by_email(email).await? {
                if owner.id != id {
                    return Err(ApiError::conflict(format!(
                        "Email already registered: {}",
                        email
                    )));
                }
            }
        }

        let user = found(self.users.update_user(id, changes).await?, "User", id)?;
        info!("Updated user {}", id);
        Ok(user)
    }

    /// Delete the principal and every role it holds
    pub async fn delete(&self, id: i32) -> Result<()> {
        affected(
            self.users.delete_user(id).await?,
            format!("User {} not found", id),
        )?;
        info!("Deleted user {}", id);
        Ok(())
    }

    /// All principals, newest first, credential hashes stripped
    pub async fn list(&self) -> Result<Vec<User>> {
        Ok(self
            .users
            .list_users()
            .await?
            .into_iter()
            .map(User::sanitized)
            .collect())
    }
}
