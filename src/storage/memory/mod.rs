//! In-memory storage backend
//!
//! All five relations live behind one `RwLock`, so every mutation, cascades
//! included, is a single critical section. Uniqueness and referential checks
//! mirror the database constraints and fail the same way, as
//! [`ApiError::Database`].

use crate::core::models::{
    CreatePermissionRequest, CreateRoleRequest, NewUser, Permission, Role, RolePermission,
    UpdatePermissionRequest, UpdateRoleRequest, UpdateUserRequest, User, UserRole,
};
use crate::core::traits::{PermissionRepository, RbacRepository, RoleRepository, UserRepository};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use sea_orm::DbErr;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i32, User>,
    roles: BTreeMap<i32, Role>,
    permissions: BTreeMap<i32, Permission>,
    user_roles: BTreeMap<(i32, i32), UserRole>,
    role_permissions: BTreeMap<(i32, i32), RolePermission>,
    next_user_id: i32,
    next_role_id: i32,
    next_permission_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

fn constraint_violation(message: &str) -> ApiError {
    ApiError::Database(DbErr::Custom(message.to_string()))
}

impl State {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn role_name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.roles
            .values()
            .any(|r| r.role_name == name && Some(r.id) != except)
    }

    fn permission_clash(&self, name: &str, resource: &str, action: &str, except: Option<i32>) -> bool {
        self.permissions.values().any(|p| {
            Some(p.id) != except
                && (p.permission_name == name || (p.resource == resource && p.action == action))
        })
    }

    fn held_role_ids(&self, user_id: i32) -> Vec<i32> {
        self.user_roles
            .keys()
            .filter(|(uid, _)| *uid == user_id)
            .map(|(_, rid)| *rid)
            .collect()
    }

    fn granted_permission_ids(&self, role_id: i32) -> impl Iterator<Item = i32> + '_ {
        self.role_permissions
            .keys()
            .filter(move |(rid, _)| *rid == role_id)
            .map(|(_, pid)| *pid)
    }

    fn effective_permission_ids(&self, user_id: i32) -> BTreeSet<i32> {
        self.held_role_ids(user_id)
            .into_iter()
            .flat_map(|rid| self.granted_permission_ids(rid).collect::<Vec<_>>())
            .collect()
    }
}

fn sort_permissions(permissions: &mut [Permission]) {
    permissions.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
}

fn sort_roles(roles: &mut [Role]) {
    roles.sort_by(|a, b| a.role_name.cmp(&b.role_name));
}

/// Process-local store implementing every repository trait
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        debug!("Creating user: {}", user.email);
        let mut state = self.state.write();

        if state.email_taken(&user.email, None) {
            return Err(constraint_violation("UNIQUE constraint failed: users.email"));
        }

        let now = Utc::now();
        let id = next_id(&mut state.next_user_id);
        let record = User {
            id,
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, record.clone());
        Ok(record)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(&self, id: i32, changes: UpdateUserRequest) -> Result<Option<User>> {
        let mut state = self.state.write();

        if let Some(email) = &changes.email {
            if state.email_taken(email, Some(id)) {
                return Err(constraint_violation("UNIQUE constraint failed: users.email"));
            }
        }

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        let mut state = self.state.write();
        if state.users.remove(&id).is_none() {
            return Ok(false);
        }
        state.user_roles.retain(|(uid, _), _| *uid != id);
        Ok(true)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.state.read().users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn create_role(&self, role: CreateRoleRequest) -> Result<Role> {
        debug!("Creating role: {}", role.role_name);
        let mut state = self.state.write();

        if state.role_name_taken(&role.role_name, None) {
            return Err(constraint_violation("UNIQUE constraint failed: roles.role_name"));
        }

        let now = Utc::now();
        let id = next_id(&mut state.next_role_id);
        let record = Role {
            id,
            role_name: role.role_name,
            description: role.description,
            created_at: now,
            updated_at: now,
        };
        state.roles.insert(id, record.clone());
        Ok(record)
    }

    async fn find_role(&self, id: i32) -> Result<Option<Role>> {
        Ok(self.state.read().roles.get(&id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        Ok(self
            .state
            .read()
            .roles
            .values()
            .find(|r| r.role_name == name)
            .cloned())
    }

    async fn update_role(&self, id: i32, changes: UpdateRoleRequest) -> Result<Option<Role>> {
        let mut state = self.state.write();

        if let Some(name) = &changes.role_name {
            if state.role_name_taken(name, Some(id)) {
                return Err(constraint_violation("UNIQUE constraint failed: roles.role_name"));
            }
        }

        let Some(role) = state.roles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.role_name {
            role.role_name = name;
        }
        if let Some(description) = changes.description {
            role.description = description;
        }
        role.updated_at = Utc::now();
        Ok(Some(role.clone()))
    }

    async fn delete_role(&self, id: i32) -> Result<bool> {
        let mut state = self.state.write();
        if state.roles.remove(&id).is_none() {
            return Ok(false);
        }
        state.user_roles.retain(|(_, rid), _| *rid != id);
        state.role_permissions.retain(|(rid, _), _| *rid != id);
        Ok(true)
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let mut roles: Vec<Role> = self.state.read().roles.values().cloned().collect();
        sort_roles(&mut roles);
        Ok(roles)
    }
}

#[async_trait]
impl PermissionRepository for MemoryStore {
    async fn create_permission(&self, permission: CreatePermissionRequest) -> Result<Permission> {
        debug!("Creating permission: {}", permission.permission_name);
        let mut state = self.state.write();

        if state.permission_clash(
            &permission.permission_name,
            &permission.resource,
            &permission.action,
            None,
        ) {
            return Err(constraint_violation("UNIQUE constraint failed: permissions"));
        }

        let now = Utc::now();
        let id = next_id(&mut state.next_permission_id);
        let record = Permission {
            id,
            permission_name: permission.permission_name,
            resource: permission.resource,
            action: permission.action,
            description: permission.description,
            created_at: now,
            updated_at: now,
        };
        state.permissions.insert(id, record.clone());
        Ok(record)
    }

    async fn find_permission(&self, id: i32) -> Result<Option<Permission>> {
        Ok(self.state.read().permissions.get(&id).cloned())
    }

    async fn find_permission_by_name(&self, name: &str) -> Result<Option<Permission>> {
        Ok(self
            .state
            .read()
            .permissions
            .values()
            .find(|p| p.permission_name == name)
            .cloned())
    }

    async fn find_permission_by_resource_action(
        &self,
        resource: &str,
        action: &str,
    ) -> Result<Option<Permission>> {
        Ok(self
            .state
            .read()
            .permissions
            .values()
            .find(|p| p.resource == resource && p.action == action)
            .cloned())
    }

    async fn update_permission(
        &self,
        id: i32,
        changes: UpdatePermissionRequest,
    ) -> Result<Option<Permission>> {
        let mut state = self.state.write();

        let Some(current) = state.permissions.get(&id).cloned() else {
            return Ok(None);
        };

        let name = changes.permission_name.unwrap_or(current.permission_name);
        let resource = changes.resource.unwrap_or(current.resource);
        let action = changes.action.unwrap_or(current.action);
        if state.permission_clash(&name, &resource, &action, Some(id)) {
            return Err(constraint_violation("UNIQUE constraint failed: permissions"));
        }

        let Some(permission) = state.permissions.get_mut(&id) else {
            return Ok(None);
        };
        permission.permission_name = name;
        permission.resource = resource;
        permission.action = action;
        if let Some(description) = changes.description {
            permission.description = description;
        }
        permission.updated_at = Utc::now();
        Ok(Some(permission.clone()))
    }

    async fn delete_permission(&self, id: i32) -> Result<bool> {
        let mut state = self.state.write();
        if state.permissions.remove(&id).is_none() {
            return Ok(false);
        }
        state.role_permissions.retain(|(_, pid), _| *pid != id);
        Ok(true)
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>> {
        let mut permissions: Vec<Permission> =
            self.state.read().permissions.values().cloned().collect();
        sort_permissions(&mut permissions);
        Ok(permissions)
    }
}

#[async_trait]
impl RbacRepository for MemoryStore {
    async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<()> {
        let mut state = self.state.write();
        if !state.users.contains_key(&user_id) || !state.roles.contains_key(&role_id) {
            return Err(constraint_violation("FOREIGN KEY constraint failed: user_roles"));
        }
        state
            .user_roles
            .entry((user_id, role_id))
            .or_insert_with(|| UserRole {
                user_id,
                role_id,
                assigned_at: Utc::now(),
            });
        Ok(())
    }

    async fn revoke_role(&self, user_id: i32, role_id: i32) -> Result<bool> {
        Ok(self
            .state
            .write()
            .user_roles
            .remove(&(user_id, role_id))
            .is_some())
    }

    async fn assign_permission(&self, role_id: i32, permission_id: i32) -> Result<()> {
        let mut state = self.state.write();
        if !state.roles.contains_key(&role_id) || !state.permissions.contains_key(&permission_id)
        {
            return Err(constraint_violation(
                "FOREIGN KEY constraint failed: role_permissions",
            ));
        }
        state
            .role_permissions
            .entry((role_id, permission_id))
            .or_insert_with(|| RolePermission {
                role_id,
                permission_id,
                assigned_at: Utc::now(),
            });
        Ok(())
    }

    async fn revoke_permission(&self, role_id: i32, permission_id: i32) -> Result<bool> {
        Ok(self
            .state
            .write()
            .role_permissions
            .remove(&(role_id, permission_id))
            .is_some())
    }

    async fn roles_of_user(&self, user_id: i32) -> Result<Vec<Role>> {
        let state = self.state.read();
        let mut roles: Vec<Role> = state
            .held_role_ids(user_id)
            .into_iter()
            .filter_map(|rid| state.roles.get(&rid).cloned())
            .collect();
        sort_roles(&mut roles);
        Ok(roles)
    }

    async fn permissions_of_role(&self, role_id: i32) -> Result<Vec<Permission>> {
        let state = self.state.read();
        let mut permissions: Vec<Permission> = state
            .granted_permission_ids(role_id)
            .filter_map(|pid| state.permissions.get(&pid).cloned())
            .collect();
        sort_permissions(&mut permissions);
        Ok(permissions)
    }

    async fn permissions_of_user(&self, user_id: i32) -> Result<Vec<Permission>> {
        let state = self.state.read();
        let mut permissions: Vec<Permission> = state
            .effective_permission_ids(user_id)
            .into_iter()
            .filter_map(|pid| state.permissions.get(&pid).cloned())
            .collect();
        sort_permissions(&mut permissions);
        Ok(permissions)
    }

    async fn users_of_role(&self, role_id: i32) -> Result<Vec<User>> {
        let state = self.state.read();
        let mut users: Vec<User> = state
            .user_roles
            .keys()
            .filter(|(_, rid)| *rid == role_id)
            .filter_map(|(uid, _)| state.users.get(uid).cloned())
            .map(User::sanitized)
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn roles_of_permission(&self, permission_id: i32) -> Result<Vec<Role>> {
        let state = self.state.read();
        let mut roles: Vec<Role> = state
            .role_permissions
            .keys()
            .filter(|(_, pid)| *pid == permission_id)
            .filter_map(|(rid, _)| state.roles.get(rid).cloned())
            .collect();
        sort_roles(&mut roles);
        Ok(roles)
    }

    async fn user_has_role(&self, user_id: i32, role_name: &str) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .held_role_ids(user_id)
            .into_iter()
            .filter_map(|rid| state.roles.get(&rid))
            .any(|r| r.role_name == role_name))
    }

    async fn user_has_permission(&self, user_id: i32, permission_name: &str) -> Result<bool> {
        let state = self.state.read();
        Ok(state
            .effective_permission_ids(user_id)
            .into_iter()
            .filter_map(|pid| state.permissions.get(&pid))
            .any(|p| p.permission_name == permission_name))
    }
}
