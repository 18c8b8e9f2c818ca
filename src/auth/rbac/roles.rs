//! Role catalog

use super::helpers::{affected, found};
use crate::core::models::{
    CreateRoleRequest, Role, RoleWithPermissions, RoleWithUsers, UpdateRoleRequest,
};
use crate::core::traits::{RbacRepository, RoleRepository};
use crate::utils::error::{ApiError, Result};
use crate::utils::normalize_key;
use std::sync::Arc;
use tracing::info;

/// Owns named roles; names are case-insensitive unique keys
#[derive(Clone)]
pub struct RoleCatalog {
    roles: Arc<dyn RoleRepository>,
    rbac: Arc<dyn RbacRepository>,
}

impl RoleCatalog {
    pub fn new(roles: Arc<dyn RoleRepository>, rbac: Arc<dyn RbacRepository>) -> Self {
        Self { roles, rbac }
    }

    pub async fn create(&self, request: CreateRoleRequest) -> Result<Role> {
        let role_name = normalize_key(&request.role_name);

        if self.roles.find_role_by_name(&role_name).await?.is_some() {
            return Err(ApiError::conflict(format!(
                "Role already exists: {}",
                role_name
            )));
        }

        let role = self
            .roles
            .create_role(CreateRoleRequest {
                role_name,
                description: request.description.trim().to_string(),
            })
            .await?;

        info!("Created role {} ({})", role.id, role.role_name);
        Ok(role)
    }

    pub async fn get(&self, id: i32) -> Result<Role> {
        found(self.roles.find_role(id).await?, "Role", id)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Role> {
        let name = normalize_key(name);
        self.roles
            .find_role_by_name(&name)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Role {} not found", name)))
    }

    /// Rename and/or re-describe; uniqueness is checked against other roles only
    pub async fn update(&self, id: i32, changes: UpdateRoleRequest) -> Result<Role> {
        self.get(id).await?;

        let changes = UpdateRoleRequest {
            role_name: changes.role_name.map(|name| normalize_key(&name)),
            description: changes.description.map(|d| d.trim().to_string()),
        };

        if let Some(name) = &changes.role_name {
            if let Some(existing) = self.roles.find_role_by_name(name).await? {
                if existing.id != id {
                    return Err(ApiError::conflict(format!("Role already exists: {}", name)));
                }
            }
        }

        let role = found(self.roles.update_role(id, changes).await?, "Role", id)?;
        info!("Updated role {}", id);
        Ok(role)
    }

    /// Delete the role together with its user and permission edges
    pub async fn delete(&self, id: i32) -> Result<()> {
        affected(
            self.roles.delete_role(id).await?,
            format!("Role {} not found", id),
        )?;
        info!("Deleted role {}", id);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Role>> {
        self.roles.list_roles().await
    }

    pub async fn with_permissions(&self, id: i32) -> Result<RoleWithPermissions> {
        let role = self.get(id).await?;
        let permissions = self.rbac.permissions_of_role(id).await?;
        Ok(RoleWithPermissions { role, permissions })
    }

    pub async fn with_users(&self, id: i32) -> Result<RoleWithUsers> {
        let role = self.get(id).await?;
        let users = self.rbac.users_of_role(id).await?;
        Ok(RoleWithUsers { role, users })
    }
}
