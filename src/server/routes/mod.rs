//! HTTP route modules
//!
//! Everything except `/health` lives under `/api/v1`.

pub mod auth;
pub mod health;
pub mod permissions;
pub mod rbac;
pub mod roles;
pub mod users;

use crate::utils::error::{ApiError, Result};
use crate::utils::validation::DataValidator;
use actix_web::{HttpResponse, web};
use serde::Serialize;

/// Prefix for every API route
pub const API_PREFIX: &str = "/api/v1";

/// Standard API response structure
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// 200 with the envelope
    pub fn ok(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }

    /// 201 with the envelope
    pub fn created(data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::success(data))
    }
}

/// Body returned by deletions and revocations
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> HttpResponse {
        ApiResponse::ok(Self {
            message: message.into(),
        })
    }
}

/// JSON extractor settings; malformed bodies become 400 with the error envelope
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

/// Path extractor settings; ids that fail to parse become 400 with the error envelope
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into())
}

/// Reject non-positive ids taken from the path
pub(crate) fn path_id(field: &str, id: i32) -> Result<i32> {
    DataValidator::validate_id(field, id)?;
    Ok(id)
}

/// Register all `/api/v1` routes; administrative scopes require `admin_role`
pub fn configure_routes(cfg: &mut web::ServiceConfig, admin_role: &str) {
    cfg.service(
        web::scope(API_PREFIX)
            .configure(auth::configure_routes)
            .configure(users::configure_routes)
            .configure(|cfg| roles::configure_routes(cfg, admin_role))
            .configure(|cfg| permissions::configure_routes(cfg, admin_role))
            .configure(|cfg| rbac::configure_routes(cfg, admin_role)),
    );
}
