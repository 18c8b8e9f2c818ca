//! Test fixtures and data factories

use rbac_api::RbacSystem;
use rbac_api::config::{Config, RbacConfig};
use rbac_api::core::models::{
    CreatePermissionRequest, CreateRoleRequest, Permission, RegisterRequest, Role, User,
};
use rbac_api::storage::Repositories;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-with-more-than-32-chars";
pub const ADMIN_EMAIL: &str = "root@example.com";
pub const PASSWORD: &str = "correct-horse";

/// Config with a fixed secret and the bootstrap admin set to [`ADMIN_EMAIL`]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config.rbac.bootstrap_admin_email = Some(ADMIN_EMAIL.to_string());
    config
}

pub fn rbac_system(repositories: &Repositories) -> RbacSystem {
    RbacSystem::new(repositories, &RbacConfig::default())
}

pub fn register_request(email: &str, name: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        name: name.to_string(),
    }
}

pub async fn user(rbac: &RbacSystem, email: &str) -> User {
    let name = email.split('@').next().unwrap_or("user");
    rbac.directory
        .create(email, "not-a-real-hash".to_string(), name)
        .await
        .expect("create user")
}

pub async fn role(rbac: &RbacSystem, name: &str) -> Role {
    rbac.roles
        .create(CreateRoleRequest {
            role_name: name.to_string(),
            description: String::new(),
        })
        .await
        .expect("create role")
}

/// Permission named `resource.action`
pub async fn permission(rbac: &RbacSystem, resource: &str, action: &str) -> Permission {
    rbac.permissions
        .create(CreatePermissionRequest {
            permission_name: format!("{}.{}", resource, action),
            resource: resource.to_string(),
            action: action.to_string(),
            description: String::new(),
        })
        .await
        .expect("create permission")
}
