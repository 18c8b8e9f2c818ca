//! HTTP response handling for errors

use super::types::ApiError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Serialization(_) | ApiError::Yaml(_) => {
                (StatusCode::BAD_REQUEST, "PARSING_ERROR")
            }
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            ApiError::Auth(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Jwt(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Timeout(_) => (StatusCode::SERVICE_UNAVAILABLE, "TIMEOUT"),
            ApiError::Internal(_) | ApiError::Crypto(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    /// Message safe to return to a client; infrastructure details stay in the logs.
    pub(super) fn public_message(&self) -> String {
        match self {
            ApiError::Database(_) => "Database operation failed".to_string(),
            ApiError::Io(_) | ApiError::Internal(_) | ApiError::Crypto(_) => {
                "An internal error occurred".to_string()
            }
            ApiError::Jwt(_) => "Invalid or expired token".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.public_message(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id: Some(crate::utils::generate_request_id()),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
