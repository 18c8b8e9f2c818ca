//! Current-user and user administration endpoints

use crate::auth::AuthenticatedUser;
use crate::core::models::UpdateUserRequest;
use crate::server::AppState;
use crate::server::middleware::RequirePermission;
use crate::server::routes::{ApiResponse, MessageResponse, path_id};
use crate::utils::error::Result;
use actix_web::{HttpResponse, guard, web};
use tracing::info;

pub const USERS_READ: &str = "users.read";
pub const USERS_DELETE: &str = "users.delete";

/// Configure `/me` and `/users` routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/me")
            .route("", web::get().to(get_me))
            .route("", web::put().to(update_me))
            .route("", web::delete().to(delete_me))
            .route("/roles", web::get().to(my_roles))
            .route("/permissions", web::get().to(my_permissions)),
    )
    .service(
        web::scope("/users")
            .guard(guard::Get())
            .wrap(RequirePermission::new(USERS_READ))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}/roles", web::get().to(user_roles))
            .route("/{id}/permissions", web::get().to(user_permissions)),
    )
    .service(
        web::scope("/users")
            .guard(guard::Delete())
            .wrap(RequirePermission::new(USERS_DELETE))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

async fn get_me(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    let me = state.rbac.directory.get(user.user_id).await?;
    Ok(ApiResponse::ok(me.sanitized()))
}

async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    request.validate()?;

    let updated = state
        .rbac
        .directory
        .update(user.user_id, request.into_inner())
        .await?;
    Ok(ApiResponse::ok(updated.sanitized()))
}

async fn delete_me(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    state.rbac.directory.delete(user.user_id).await?;
    info!("User {} deleted their account", user.user_id);
    Ok(MessageResponse::ok("Account deleted"))
}

async fn my_roles(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    let view = state.rbac.assignments.user_with_roles(user.user_id).await?;
    Ok(ApiResponse::ok(view))
}

async fn my_permissions(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let view = state
        .rbac
        .assignments
        .user_with_permissions(user.user_id)
        .await?;
    Ok(ApiResponse::ok(view))
}

async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(ApiResponse::ok(state.rbac.directory.list().await?))
}

async fn get_user(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let id = path_id("user_id", path.into_inner())?;
    let user = state.rbac.directory.get(id).await?;
    Ok(ApiResponse::ok(user.sanitized()))
}

async fn user_roles(state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse> {
    let id = path_id("user_id", path.into_inner())?;
    Ok(ApiResponse::ok(state.rbac.assignments.user_with_roles(id).await?))
}

async fn user_permissions(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path_id("user_id", path.into_inner())?;
    Ok(ApiResponse::ok(
        state.rbac.assignments.user_with_permissions(id).await?,
    ))
}

async fn delete_user(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = path_id("user_id", path.into_inner())?;
    state.rbac.directory.delete(id).await?;
    info!("User {} deleted by {}", id, admin.user_id);
    Ok(MessageResponse::ok("User deleted"))
}
