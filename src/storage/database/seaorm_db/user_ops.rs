use crate::core::models::{NewUser, UpdateUserRequest, User};
use crate::core::traits::UserRepository;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user, user_role};
use super::types::SeaOrmDatabase;

#[async_trait]
impl UserRepository for SeaOrmDatabase {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        debug!("Creating user: {}", user.email);

        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.into())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", id);

        let user_model = entities::User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(user_model.map(Into::into))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let user_model = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(user_model.map(Into::into))
    }

    async fn update_user(&self, id: i32, changes: UpdateUserRequest) -> Result<Option<User>> {
        debug!("Updating user: {}", id);

        let Some(user_model) = entities::User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?
        else {
            return Ok(None);
        };

        let mut active_model: user::ActiveModel = user_model.into();
        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(email) = changes.email {
            active_model.email = Set(email);
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(Some(updated.into()))
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        debug!("Deleting user: {}", id);

        let txn = self.db.begin().await.map_err(ApiError::Database)?;

        entities::UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(ApiError::Database)?;

        let result = entities::User::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(ApiError::Database)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(ApiError::Database)?;
            return Ok(false);
        }

        txn.commit().await.map_err(ApiError::Database)?;
        Ok(true)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        debug!("Listing users");

        let models = entities::User::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
