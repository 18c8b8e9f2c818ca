//! Role, permission and assignment types

use crate::core::models::User;
use crate::utils::error::Result;
use crate::utils::validation::DataValidator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named group of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i32,
    /// Normalized role name (unique)
    pub role_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Capability unit, unique by name and by `(resource, action)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i32,
    pub permission_name: String,
    pub resource: String,
    pub action: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User to role edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: i32,
    pub role_id: i32,
    pub assigned_at: DateTime<Utc>,
}

/// Role to permission edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    pub role_id: i32,
    pub permission_id: i32,
    pub assigned_at: DateTime<Utc>,
}

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const ACTION_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    pub role_name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateRoleRequest {
    pub fn validate(&self) -> Result<()> {
        DataValidator::validate_length("role_name", &self.role_name, NAME_MIN, NAME_MAX)?;
        DataValidator::validate_max_length("description", &self.description, DESCRIPTION_MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateRoleRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.role_name {
            DataValidator::validate_length("role_name", name, NAME_MIN, NAME_MAX)?;
        }
        if let Some(description) = &self.description {
            DataValidator::validate_max_length("description", description, DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePermissionRequest {
    pub permission_name: String,
    pub resource: String,
    pub action: String,
    #[serde(default)]
    pub description: String,
}

impl CreatePermissionRequest {
    pub fn validate(&self) -> Result<()> {
        DataValidator::validate_length(
            "permission_name",
            &self.permission_name,
            NAME_MIN,
            NAME_MAX,
        )?;
        DataValidator::validate_length("resource", &self.resource, NAME_MIN, NAME_MAX)?;
        DataValidator::validate_length("action", &self.action, NAME_MIN, ACTION_MAX)?;
        DataValidator::validate_max_length("description", &self.description, DESCRIPTION_MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePermissionRequest {
    #[serde(default)]
    pub permission_name: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdatePermissionRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.permission_name {
            DataValidator::validate_length("permission_name", name, NAME_MIN, NAME_MAX)?;
        }
        if let Some(resource) = &self.resource {
            DataValidator::validate_length("resource", resource, NAME_MIN, NAME_MAX)?;
        }
        if let Some(action) = &self.action {
            DataValidator::validate_length("action", action, NAME_MIN, ACTION_MAX)?;
        }
        if let Some(description) = &self.description {
            DataValidator::validate_max_length("description", description, DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRoleRequest {
    pub user_id: i32,
    pub role_id: i32,
}

impl AssignRoleRequest {
    pub fn validate(&self) -> Result<()> {
        DataValidator::validate_id("user_id", self.user_id)?;
        DataValidator::validate_id("role_id", self.role_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPermissionRequest {
    pub role_id: i32,
    pub permission_id: i32,
}

impl AssignPermissionRequest {
    pub fn validate(&self) -> Result<()> {
        DataValidator::validate_id("role_id", self.role_id)?;
        DataValidator::validate_id("permission_id", self.permission_id)
    }
}

/// User together with the roles it holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRoles {
    #[serde(flatten)]
    pub user: User,
    pub roles: Vec<Role>,
}

/// User together with its effective permissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithPermissions {
    #[serde(flatten)]
    pub user: User,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithPermissions {
    #[serde(flatten)]
    pub role: Role,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWithUsers {
    #[serde(flatten)]
    pub role: Role,
    pub users: Vec<User>,
}
