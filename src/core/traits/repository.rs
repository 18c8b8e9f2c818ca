//! Repository traits for users, roles, permissions and assignments

use crate::core::models::{
    CreatePermissionRequest, CreateRoleRequest, NewUser, Permission, Role,
    UpdatePermissionRequest, UpdateRoleRequest, UpdateUserRequest, User,
};
use crate::utils::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn find_user(&self, id: i32) -> Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Apply the present fields; `None` when the id does not exist
    async fn update_user(&self, id: i32, changes: UpdateUserRequest) -> Result<Option<User>>;

    /// Delete the user and its role edges atomically; `false` when absent
    async fn delete_user(&self, id: i32) -> Result<bool>;

    /// Newest first
    async fn list_users(&self) -> Result<Vec<User>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create_role(&self, role: CreateRoleRequest) -> Result<Role>;

    async fn find_role(&self, id: i32) -> Result<Option<Role>>;

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>>;

    async fn update_role(&self, id: i32, changes: UpdateRoleRequest) -> Result<Option<Role>>;

    /// Delete the role with its user and permission edges atomically
    async fn delete_role(&self, id: i32) -> Result<bool>;

    /// Ordered by name
    async fn list_roles(&self) -> Result<Vec<Role>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn create_permission(&self, permission: CreatePermissionRequest) -> Result<Permission>;

    async fn find_permission(&self, id: i32) -> Result<Option<Permission>>;

    async fn find_permission_by_name(&self, name: &str) -> Result<Option<Permission>>;

    async fn find_permission_by_resource_action(
        &self,
        resource: &str,
        action: &str,
    ) -> Result<Option<Permission>>;

    async fn update_permission(
        &self,
        id: i32,
        changes: UpdatePermissionRequest,
    ) -> Result<Option<Permission>>;

    /// Delete the permission with its role edges atomically
    async fn delete_permission(&self, id: i32) -> Result<bool>;

    /// Ordered by `(resource, action)`
    async fn list_permissions(&self) -> Result<Vec<Permission>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RbacRepository: Send + Sync {
    /// Insert the edge unless it already exists
    async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<()>;

    /// `false` when no such edge existed
    async fn revoke_role(&self, user_id: i32, role_id: i32) -> Result<bool>;

    async fn assign_permission(&self, role_id: i32, permission_id: i32) -> Result<()>;

    async fn revoke_permission(&self, role_id: i32, permission_id: i32) -> Result<bool>;

    /// Ordered by role name
    async fn roles_of_user(&self, user_id: i32) -> Result<Vec<Role>>;

    /// Ordered by `(resource, action)`
    async fn permissions_of_role(&self, role_id: i32) -> Result<Vec<Permission>>;

    /// Deduplicated union over held roles, ordered by `(resource, action)`
    async fn permissions_of_user(&self, user_id: i32) -> Result<Vec<Permission>>;

    /// Ordered by user name
    async fn users_of_role(&self, role_id: i32) -> Result<Vec<User>>;

    /// Ordered by role name
    async fn roles_of_permission(&self, permission_id: i32) -> Result<Vec<Role>>;

    async fn user_has_role(&self, user_id: i32, role_name: &str) -> Result<bool>;

    async fn user_has_permission(&self, user_id: i32, permission_name: &str) -> Result<bool>;
}
