//! Permission catalog
//!
//! Permissions are unique on two independent axes: `permission_name` and the
//! `(resource, action)` pair. Both are checked on create and update.

use super::helpers::{affected, found};
use crate::core::models::{
    CreatePermissionRequest, Permission, Role, UpdatePermissionRequest,
};
use crate::core::traits::{PermissionRepository, RbacRepository};
use crate::utils::error::{ApiError, Result};
use crate::utils::normalize_key;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct PermissionCatalog {
    permissions: Arc<dyn PermissionRepository>,
    rbac: Arc<dyn RbacRepository>,
}

impl PermissionCatalog {
    pub fn new(permissions: Arc<dyn PermissionRepository>, rbac: Arc<dyn RbacRepository>) -> Self {
        Self { permissions, rbac }
    }

    /// Conflict when another permission already uses the name or the pair
    async fn ensure_unique(
        &self,
        name: &str,
        resource: &str,
        action: &str,
        except: Option<i32>,
    ) -> Result<()> {
        if let Some(existing) = self.permissions.find_permission_by_name(name).await? {
            if Some(existing.id) != except {
                return Err(ApiError::conflict(format!(
                    "Permission already exists: {}",
                    name
                )));
            }
        }

        if let Some(existing) = self
            .permissions
            .find_permission_by_resource_action(resource, action)
            .await?
        {
            if Some(existing.id) != except {
                return Err(ApiError::conflict(format!(
                    "Permission for {}:{} already exists",
                    resource, action
                )));
            }
        }

        Ok(())
    }

    pub async fn create(&self, request: CreatePermissionRequest) -> Result<Permission> {
        let request = CreatePermissionRequest {
            permission_name: normalize_key(&request.permission_name),
            resource: normalize_key(&request.resource),
            action: normalize_key(&request.action),
            description: request.description.trim().to_string(),
        };

        self.ensure_unique(
            &request.permission_name,
            &request.resource,
            &request.action,
            None,
        )
        .await?;

        let permission = self.permissions.create_permission(request).await?;
        info!(
            "Created permission {} ({})",
            permission.id, permission.permission_name
        );
        Ok(permission)
    }

    pub async fn get(&self, id: i32) -> Result<Permission> {
        found(self.permissions.find_permission(id).await?, "Permission", id)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Permission> {
        let name = normalize_key(name);
        self.permissions
            .find_permission_by_name(&name)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Permission {} not found", name)))
    }

    pub async fn update(&self, id: i32, changes: UpdatePermissionRequest) -> Result<Permission> {
        let current = self.get(id).await?;

        let changes = UpdatePermissionRequest {
            permission_name: changes.permission_name.map(|v| normalize_key(&v)),
            resource: changes.resource.map(|v| normalize_key(&v)),
            action: changes.action.map(|v| normalize_key(&v)),
            description: changes.description.map(|v| v.trim().to_string()),
        };

        // Uniqueness applies to the row as it will look after the update
        let name = changes
            .permission_name
            .as_deref()
            .unwrap_or(&current.permission_name);
        let resource = changes.resource.as_deref().unwrap_or(&current.resource);
        let action = changes.action.as_deref().unwrap_or(&current.action);
        self.ensure_unique(name, resource, action, Some(id)).await?;

        let permission = found(
            self.permissions.update_permission(id, changes).await?,
            "Permission",
            id,
        )?;
        info!("Updated permission {}", id);
        Ok(permission)
    }

    /// Delete the permission and every grant of it
    pub async fn delete(&self, id: i32) -> Result<()> {
        affected(
            self.permissions.delete_permission(id).await?,
            format!("Permission {} not found", id),
        )?;
        info!("Deleted permission {}", id);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Permission>> {
        self.permissions.list_permissions().await
    }

    /// Roles granting this permission, ordered by name
    pub async fn roles_of(&self, id: i32) -> Result<Vec<Role>> {
        self.get(id).await?;
        self.rbac.roles_of_permission(id).await
    }
}
