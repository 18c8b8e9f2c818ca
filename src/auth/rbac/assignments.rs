//! Assignment graph
//!
//! User to role and role to permission edges. Every mutation verifies that
//! both endpoints exist before touching an edge. Assigning is idempotent;
//! revoking a missing edge is `NotFound`.

use super::helpers::{affected, found};
use crate::core::models::{Permission, Role, User, UserWithPermissions, UserWithRoles};
use crate::core::traits::{PermissionRepository, RbacRepository, RoleRepository, UserRepository};
use crate::storage::Repositories;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AssignmentGraph {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<dyn PermissionRepository>,
    rbac: Arc<dyn RbacRepository>,
}

impl AssignmentGraph {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            users: repositories.users.clone(),
            roles: repositories.roles.clone(),
            permissions: repositories.permissions.clone(),
            rbac: repositories.rbac.clone(),
        }
    }

    async fn require_user(&self, user_id: i32) -> Result<User> {
        found(self.users.find_user(user_id).await?, "User", user_id)
    }

    async fn require_role(&self, role_id: i32) -> Result<Role> {
        found(self.roles.find_role(role_id).await?, "Role", role_id)
    }

    async fn require_permission(&self, permission_id: i32) -> Result<Permission> {
        found(
            self.permissions.find_permission(permission_id).await?,
            "Permission",
            permission_id,
        )
    }

    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<()> {
        self.require_user(user_id).await?;
        self.require_role(role_id).await?;

        self.rbac.assign_role(user_id, role_id).await?;
        info!("Assigned role {} to user {}", role_id, user_id);
        Ok(())
    }

    pub async fn revoke_role(&self, user_id: i32, role_id: i32) -> Result<()> {
        affected(
            self.rbac.revoke_role(user_id, role_id).await?,
            "User-role assignment not found",
        )?;
        info!("Revoked role {} from user {}", role_id, user_id);
        Ok(())
    }

    pub async fn assign_permission(&self, role_id: i32, permission_id: i32) -> Result<()> {
        self.require_role(role_id).await?;
        self.require_permission(permission_id).await?;

        self.rbac.assign_permission(role_id, permission_id).await?;
        info!("Assigned permission {} to role {}", permission_id, role_id);
        Ok(())
    }

    pub async fn revoke_permission(&self, role_id: i32, permission_id: i32) -> Result<()> {
        affected(
            self.rbac.revoke_permission(role_id, permission_id).await?,
            "Role-permission assignment not found",
        )?;
        info!("Revoked permission {} from role {}", permission_id, role_id);
        Ok(())
    }

    /// Roles held by the user, ordered by name
    pub async fn roles_of(&self, user_id: i32) -> Result<Vec<Role>> {
        self.require_user(user_id).await?;
        self.rbac.roles_of_user(user_id).await
    }

    /// Permissions granted to the role, ordered by `(resource, action)`
    pub async fn permissions_of_role(&self, role_id: i32) -> Result<Vec<Permission>> {
        self.require_role(role_id).await?;
        self.rbac.permissions_of_role(role_id).await
    }

    /// Effective permissions through every held role, each listed once
    pub async fn permissions_of_user(&self, user_id: i32) -> Result<Vec<Permission>> {
        self.require_user(user_id).await?;
        self.rbac.permissions_of_user(user_id).await
    }

    pub async fn users_of_role(&self, role_id: i32) -> Result<Vec<User>> {
        self.require_role(role_id).await?;
        self.rbac.users_of_role(role_id).await
    }

    pub async fn user_with_roles(&self, user_id: i32) -> Result<UserWithRoles> {
        let user = self.require_user(user_id).await?.sanitized();
        let roles = self.rbac.roles_of_user(user_id).await?;
        Ok(UserWithRoles { user, roles })
    }

    pub async fn user_with_permissions(&self, user_id: i32) -> Result<UserWithPermissions> {
        let user = self.require_user(user_id).await?.sanitized();
        let permissions = self.rbac.permissions_of_user(user_id).await?;
        Ok(UserWithPermissions { user, permissions })
    }
}
