//! Registration and login endpoints

use crate::core::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::server::AppState;
use crate::server::routes::ApiResponse;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use tracing::info;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}

/// Create a principal and apply the configured default grants
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    request.validate()?;

    let user = state.rbac.register(&request).await?;
    info!("Registered user {}", user.id);

    Ok(ApiResponse::created(user.sanitized()))
}

/// Exchange credentials for a bearer token
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    request.validate()?;

    let user = state
        .rbac
        .directory
        .authenticate(&request.email, &request.password)
        .await?;
    let token = state.jwt.create_token(user.id)?;
    let roles = state.rbac.login_roles(user.id).await?;

    info!("User {} logged in", user.id);
    Ok(ApiResponse::ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expiration(),
        user: user.sanitized(),
        roles,
    }))
}
