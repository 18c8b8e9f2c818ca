//! Authentication and authorization
//!
//! Credentials and tokens live in [`password`] and [`jwt`]; the role and
//! permission core lives in [`rbac`].

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtHandler};
pub use rbac::{
    AssignmentGraph, AuthorizationEvaluator, Decision, PermissionCatalog, PrincipalDirectory,
    RbacSystem, RoleCatalog,
};

/// Principal attached to a request once its bearer token has been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}
