//! RBAC configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What request gating does when the evaluator cannot reach a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Treat an infrastructure error as a denial
    #[default]
    Closed,
    /// Let the request through and log the error
    Open,
}

/// A permission created on startup and granted to the admin role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPermission {
    pub name: String,
    pub resource: String,
    pub action: String,
    #[serde(default)]
    pub description: String,
}

impl SeedPermission {
    fn new(resource: &str, action: &str, description: &str) -> Self {
        Self {
            name: format!("{}.{}", resource, action),
            resource: resource.to_string(),
            action: action.to_string(),
            description: description.to_string(),
        }
    }
}

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Role required by the administrative routes
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
    /// Role granted to every newly registered user, when it exists
    #[serde(default = "default_user_role")]
    pub default_role: Option<String>,
    /// Principal that receives the admin role when it registers
    #[serde(default)]
    pub bootstrap_admin_email: Option<String>,
    /// Permissions ensured at startup and granted to the admin role
    #[serde(default = "default_seed_permissions")]
    pub seed_permissions: Vec<SeedPermission>,
    /// Gating behavior on infrastructure errors
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Upper bound for a single authorization decision
    #[serde(default = "default_decision_timeout_ms")]
    pub decision_timeout_ms: u64,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            admin_role: default_admin_role(),
            default_role: default_user_role(),
            bootstrap_admin_email: None,
            seed_permissions: default_seed_permissions(),
            failure_policy: FailurePolicy::default(),
            decision_timeout_ms: default_decision_timeout_ms(),
        }
    }
}

impl RbacConfig {
    pub fn decision_timeout(&self) -> Duration {
        Duration::from_millis(self.decision_timeout_ms)
    }
}

fn default_user_role() -> Option<String> {
    Some("user".to_string())
}

fn default_seed_permissions() -> Vec<SeedPermission> {
    vec![
        SeedPermission::new("users", "read", "Read user information"),
        SeedPermission::new("users", "write", "Update user information"),
        SeedPermission::new("users", "delete", "Delete users"),
    ]
}
