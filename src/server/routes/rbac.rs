//! Assignment endpoints: grant and revoke user-role and role-permission edges

use crate::core::models::{AssignPermissionRequest, AssignRoleRequest};
use crate::server::AppState;
use crate::server::middleware::RequireRole;
use crate::server::routes::{MessageResponse, path_id};
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

/// Configure `/rbac` routes behind the admin role
pub fn configure_routes(cfg: &mut web::ServiceConfig, admin_role: &str) {
    cfg.service(
        web::scope("/rbac")
            .wrap(RequireRole::new(admin_role))
            .route("/user-roles", web::post().to(assign_role))
            .route(
                "/users/{user_id}/roles/{role_id}",
                web::delete().to(revoke_role),
            )
            .route("/role-permissions", web::post().to(assign_permission))
            .route(
                "/roles/{role_id}/permissions/{permission_id}",
                web::delete().to(revoke_permission),
            ),
    );
}

/// Idempotent: granting an edge that already exists succeeds
async fn assign_role(
    state: web::Data<AppState>,
    request: web::Json<AssignRoleRequest>,
) -> Result<HttpResponse> {
    request.validate()?;
    state
        .rbac
        .assignments
        .assign_role(request.user_id, request.role_id)
        .await?;
    Ok(MessageResponse::ok("Role assigned"))
}

async fn revoke_role(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    let (user_id, role_id) = path.into_inner();
    let user_id = path_id("user_id", user_id)?;
    let role_id = path_id("role_id", role_id)?;
    state.rbac.assignments.revoke_role(user_id, role_id).await?;
    Ok(MessageResponse::ok("Role revoked"))
}

async fn assign_permission(
    state: web::Data<AppState>,
    request: web::Json<AssignPermissionRequest>,
) -> Result<HttpResponse> {
    request.validate()?;
    state
        .rbac
        .assignments
        .assign_permission(request.role_id, request.permission_id)
        .await?;
    Ok(MessageResponse::ok("Permission assigned"))
}

async fn revoke_permission(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    let (role_id, permission_id) = path.into_inner();
    let role_id = path_id("role_id", role_id)?;
    let permission_id = path_id("permission_id", permission_id)?;
    state
        .rbac
        .assignments
        .revoke_permission(role_id, permission_id)
        .await?;
    Ok(MessageResponse::ok("Permission revoked"))
}
