//! HTTP middleware implementations
//!
//! - Bearer token authentication
//! - Role and permission gating

mod auth;
mod helpers;
mod rbac;


pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use helpers::{extract_bearer_token, is_public_route};
pub use rbac::{Requirement, RequirePermission, RequireRole, RequirementService};
