use crate::core::models::{CreatePermissionRequest, Permission, UpdatePermissionRequest};
use crate::core::traits::PermissionRepository;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, permission, role_permission};
use super::types::SeaOrmDatabase;

#[async_trait]
impl PermissionRepository for SeaOrmDatabase {
    async fn create_permission(&self, permission: CreatePermissionRequest) -> Result<Permission> {
        debug!("Creating permission: {}", permission.permission_name);

        let now = chrono::Utc::now();
        let model = permission::ActiveModel {
            permission_name: Set(permission.permission_name),
            resource: Set(permission.resource),
            action: Set(permission.action),
            description: Set(permission.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(ApiError::Database)?;

        Ok(model.into())
    }

    async fn find_permission(&self, id: i32) -> Result<Option<Permission>> {
        debug!("Finding permission by ID: {}", id);

        let model = entities::Permission::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(Into::into))
    }

    async fn find_permission_by_name(&self, name: &str) -> Result<Option<Permission>> {
        debug!("Finding permission by name: {}", name);

        let model = entities::Permission::find()
            .filter(permission::Column::PermissionName.eq(name))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(Into::into))
    }

    async fn find_permission_by_resource_action(
        &self,
        resource: &str,
        action: &str,
    ) -> Result<Option<Permission>> {
        debug!("Finding permission by resource/action: {}:{}", resource, action);

        let model = entities::Permission::find()
            .filter(permission::Column::Resource.eq(resource))
            .filter(permission::Column::Action.eq(action))
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(Into::into))
    }

    async fn update_permission(
        &self,
        id: i32,
        changes: UpdatePermissionRequest,
    ) -> Result<Option<Permission>> {
        debug!("Updating permission: {}", id);

        let Some(model) = entities::Permission::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?
        else {
            return Ok(None);
        };

        let mut active_model: permission::ActiveModel = model.into();
        if let Some(name) = changes.permission_name {
            active_model.permission_name = Set(name);
        }
        if let Some(resource) = changes.resource {
            active_model.resource = Set(resource);
        }
        if let Some(action) = changes.action {
            active_model.action = Set(action);
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

    async fn delete_permission(&self, id: i32) -> Result<bool> {
        debug!("Deleting permission: {}", id);

        let txn = self.db.begin().await.map_err(ApiError::Database)?;

        entities::RolePermission::delete_many()
            .filter(role_permission::Column::PermissionId.eq(id))
            .exec(&txn)
            .await
            .map_err(ApiError::Database)?;

        let result = entities::Permission::delete_by_id(id)
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

    async fn list_permissions(&self) -> Result<Vec<Permission>> {
        debug!("Listing permissions");

        let models = entities::Permission::find()
            .order_by_asc(permission::Column::Resource)
            .order_by_asc(permission::Column::Action)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
