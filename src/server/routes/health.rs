//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, error};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status information
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub storage: StorageHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageHealth {
    pub backend: &'static str,
    pub healthy: bool,
}

/// Liveness plus a round trip to the store; 503 when the store is unreachable
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let healthy = match state.storage.health_check().await {
        Ok(()) => true,
        Err(e) => {
            error!("Storage health check failed: {}", e);
            false
        }
    };

    let status = HealthStatus {
        status: Cow::Borrowed(if healthy { "healthy" } else { "unhealthy" }),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        storage: StorageHealth {
            backend: state.storage.backend_name(),
            healthy,
        },
    };

    respond(status, healthy)
}

fn respond(status: HealthStatus, healthy: bool) -> HttpResponse {
    if healthy {
        ApiResponse::ok(status)
    } else {
        HttpResponse::ServiceUnavailable().json(ApiResponse {
            success: false,
            data: status,
        })
    }
}
