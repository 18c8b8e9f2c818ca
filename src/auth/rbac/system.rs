//! RBAC system wiring and startup bootstrap

use super::{
    AssignmentGraph, AuthorizationEvaluator, PermissionCatalog, PrincipalDirectory, RoleCatalog,
};
use crate::config::RbacConfig;
use crate::core::models::{CreatePermissionRequest, CreateRoleRequest, RegisterRequest, Role, User};
use crate::storage::Repositories;
use crate::utils::error::Result;
use crate::utils::normalize_key;
use tracing::{debug, error, info, warn};

/// All RBAC services over one set of repositories
#[derive(Clone)]
pub struct RbacSystem {
    pub(super) config: RbacConfig,
    pub directory: PrincipalDirectory,
    pub roles: RoleCatalog,
    pub permissions: PermissionCatalog,
    pub assignments: AssignmentGraph,
    pub evaluator: AuthorizationEvaluator,
}

impl RbacSystem {
    pub fn new(repositories: &Repositories, config: &RbacConfig) -> Self {
        Self {
            config: config.clone(),
            directory: PrincipalDirectory::new(repositories.users.clone()),
            roles: RoleCatalog::new(repositories.roles.clone(), repositories.rbac.clone()),
            permissions: PermissionCatalog::new(
                repositories.permissions.clone(),
                repositories.rbac.clone(),
            ),
            assignments: AssignmentGraph::new(repositories),
            evaluator: AuthorizationEvaluator::new(
                repositories.rbac.clone(),
                config.decision_timeout(),
            ),
        }
    }

    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    /// Ensure the admin role and the seed permissions exist, and that the
    /// admin role holds every seed permission. Safe to run on every start.
    pub async fn bootstrap(&self) -> Result<Role> {
        info!("Bootstrapping RBAC data");

        let admin = self.ensure_role(&self.config.admin_role, "Administrator").await?;

        for seed in &self.config.seed_permissions {
            let permission = match self.permissions.get_by_name(&seed.name).await {
                Ok(permission) => permission,
                Err(e) if e.is_not_found() => {
                    self.permissions
                        .create(CreatePermissionRequest {
                            permission_name: seed.name.clone(),
                            resource: seed.resource.clone(),
                            action: seed.action.clone(),
                            description: seed.description.clone(),
                        })
                        .await?
                }
                Err(e) => return Err(e),
            };
            self.assignments
                .assign_permission(admin.id, permission.id)
                .await?;
        }

        info!(
            "RBAC bootstrap complete: role '{}' holds {} seed permissions",
            admin.role_name,
            self.config.seed_permissions.len()
        );
        Ok(admin)
    }

    async fn ensure_role(&self, name: &str, description: &str) -> Result<Role> {
        match self.roles.get_by_name(name).await {
            Ok(role) => Ok(role),
            Err(e) if e.is_not_found() => {
                self.roles
                    .create(CreateRoleRequest {
                        role_name: name.to_string(),
                        description: description.to_string(),
                    })
                    .await
            }
            Err(e) => Err(e),
        }
    }

    /// Register a principal and apply the configured startup grants
    ///
    /// Grants are best-effort: once the account exists a failed grant is
    /// logged and registration still succeeds, so an administrator can
    /// assign the role later.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let user = self.directory.register(request).await?;

        if let Some(role_name) = &self.config.default_role {
            self.grant_on_register(user.id, role_name).await;
        }

        let is_bootstrap_admin = self
            .config
            .bootstrap_admin_email
            .as_deref()
            .is_some_and(|email| normalize_key(email) == user.email);
        if is_bootstrap_admin {
            info!("Granting '{}' to bootstrap admin {}", self.config.admin_role, user.id);
            self.grant_on_register(user.id, &self.config.admin_role).await;
        }

        Ok(user)
    }

    async fn grant_on_register(&self, user_id: i32, role_name: &str) {
        if let Err(e) = self.grant_by_name(user_id, role_name).await {
            error!(
                "Registered user {} but failed to grant role '{}': {}",
                user_id, role_name, e
            );
        }
    }

    /// Assign a role looked up by name; a missing role is skipped
    async fn grant_by_name(&self, user_id: i32, role_name: &str) -> Result<()> {
        match self.roles.get_by_name(role_name).await {
            Ok(role) => self.assignments.assign_role(user_id, role.id).await,
            Err(e) if e.is_not_found() => {
                warn!("Role '{}' does not exist, not granting it to {}", role_name, user_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Roles of a freshly authenticated user, for the login response
    pub async fn login_roles(&self, user_id: i32) -> Result<Vec<Role>> {
        debug!("Loading login roles for user {}", user_id);
        self.assignments.roles_of(user_id).await
    }
}
