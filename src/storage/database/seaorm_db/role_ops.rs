use crate::core::models::{CreateRoleRequest, Role, UpdateRoleRequest};
use crate::core::traits::RoleRepository;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, role, role_permission, user_role};
use super::types::SeaOrmDatabase;

#[async_trait]
impl RoleRepository for SeaOrmDatabase {
    async fn create_role(&self, role: CreateRoleRequest) -> Result<Role> {
        debug!("Creating role: {}", role.role_name);

        let now = chrono::Utc::now();
        let model = role::ActiveModel {
            role_name: Set(role.role_name),
            description: Set(role.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(model.into())
    }

    async fn find_role(&self, id: i32) -> Result<Option<Role>> {
        debug!("Finding role by ID: {}", id);

        let model = entities::Role::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(Into::into))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        debug!("Finding role by name: {}", name);

        let model = entities::Role::find()
            .filter(role::Column::RoleName.eq(name))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(Into::into))
    }

    async fn update_role(&self, id: i32, changes: UpdateRoleRequest) -> Result<Option<Role>> {
        debug!("Updating role: {}", id);

        let Some(model) = entities::Role::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?
        else {
            return Ok(None);
        };

        let mut active_model: role::ActiveModel = model.into();
        if let Some(name) = changes.role_name {
            active_model.role_name = Set(name);
        }
        if let Some(description) = changes.description {
            active_model.description = Set(description);
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(Some(updated.into()))
    }

    async fn delete_role(&self, id: i32) -> Result<bool> {
        debug!("Deleting role: {}", id);

        let txn = self.db.begin().await.map_err(ApiError::Database)?;

        entities::UserRole::delete_many()
            .filter(user_role::Column::RoleId.eq(id))
            .exec(&txn)
            .await
            .map_err(ApiError::Database)?;

        entities::RolePermission::delete_many()
            .filter(role_permission::Column::RoleId.eq(id))
            .exec(&txn)
            .await
            .map_err(ApiError::Database)?;

        let result = entities::Role::delete_by_id(id)
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

    async fn list_roles(&self) -> Result<Vec<Role>> {
        debug!("Listing roles");

        let models = entities::Role::find()
            .order_by_asc(role::Column::RoleName)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
