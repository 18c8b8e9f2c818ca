//! Role catalog endpoints

use crate::core::models::{CreateRoleRequest, UpdateRoleRequest};
use crate::server::AppState;
use crate::server::middleware::RequireRole;
use crate::server::routes::{ApiResponse, MessageResponse, path_id};
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

/// Configure `/roles` routes behind the admin role
pub fn configure_routes(cfg: &mut web::ServiceConfig, admin_role: &str) {
    cfg.service(
        web::scope("/roles")
            .wrap(RequireRole::new(admin_role))
            .route("", web::get().to(list_roles))
            .route("", web::post().to(create_role))
            .route("/{id}", web::get().to(get_role))
            .route("/{id}", web::put().to(update_role))
            .route("/{id}", web::delete().to(delete_role))
            .route("/{id}/permissions", web::get().to(role_permissions))
            .route("/{id}/users", web::get().to(role_users)),
    );
}

async fn list_roles(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(state.rbac.roles.list().await?))
}

async fn create_role(
    state: web::Data<AppState>,
    request: web::Json<CreateRoleRequest>,
) -> Result<HttpResponse> {
    request.validate()?;
    let role = state.rbac.roles.create(request.into_inner()).await?;
    Ok(ApiResponse::created(role))
}

async fn get_role(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let id = path_id("role_id", path.into_inner())?;
    Ok(ApiResponse::ok(state.rbac.roles.get(id).await?))
}

async fn update_role(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse> {
    let id = path_id("role_id", path.into_inner())?;
    request.validate()?;
    let role = state.rbac.roles.update(id, request.into_inner()).await?;
    Ok(ApiResponse::ok(role))
}

async fn delete_role(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let id = path_id("role_id", path.into_inner())?;
    state.rbac.roles.delete(id).await?;
    Ok(MessageResponse::ok("Role deleted"))
}

async fn role_permissions(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path_id("role_id", path.into_inner())?;
    Ok(ApiResponse::ok(state.rbac.roles.with_permissions(id).await?))
}

async fn role_users(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let id = path_id("role_id", path.into_inner())?;
    Ok(ApiResponse::ok(state.rbac.roles.with_users(id).await?))
}
