//! Permission catalog endpoints

use crate::core::models::{CreatePermissionRequest, UpdatePermissionRequest};
use crate::server::AppState;
use crate::server::middleware::RequireRole;
use crate::server::routes::{ApiResponse, MessageResponse, path_id};
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

/// Configure `/permissions` routes behind the admin role
pub fn configure_routes(cfg: &mut web::ServiceConfig, admin_role: &str) {
    cfg.service(
        web::scope("/permissions")
            .wrap(RequireRole::new(admin_role))
            .route("", web::get().to(list_permissions))
            .route("", web::post().to(create_permission))
            .route("/{id}", web::get().to(get_permission))
            .route("/{id}", web::put().to(update_permission))
            .route("/{id}", web::delete().to(delete_permission))
            .route("/{id}/roles", web::get().to(permission_roles)),
    );
}

async fn list_permissions(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(state.rbac.permissions.list().await?))
}

async fn create_permission(
    state: web::Data<AppState>,
    request: web::Json<CreatePermissionRequest>,
) -> Result<HttpResponse> {
    request.validate()?;
    let permission = state
        .rbac
        .permissions
        .create(request.into_inner())
        .await?;
    Ok(ApiResponse::created(permission))
}

async fn get_permission(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let id = path_id("permission_id", path.into_inner())?;
    Ok(ApiResponse::ok(state.rbac.permissions.get(id).await?))
}

async fn update_permission(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    request: web::Json<UpdatePermissionRequest>,
) -> Result<HttpResponse> {
    let id = path_id("permission_id", path.into_inner())?;
    request.validate()?;
    let permission = state
        .rbac
        .permissions
        .update(id, request.into_inner())
        .await?;
    Ok(ApiResponse::ok(permission))
}

async fn delete_permission(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path_id("permission_id", path.into_inner())?;
    state.rbac.permissions.delete(id).await?;
    Ok(MessageResponse::ok("Permission deleted"))
}

async fn permission_roles(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path_id("permission_id", path.into_inner())?;
    Ok(ApiResponse::ok(state.rbac.permissions.roles_of(id).await?))
}
