//! Error handling module for the Devine backend.
//!
//! Provides the application error type with its mapping to HTTP status codes
//! and the JSON error body. Every client-facing error carries a `message`;
//! internal details are logged and never echoed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or wrong credentials
    Unauthorized(String),
    /// Credentials can never grant access
    Forbidden(String),
    /// Resource not found
    NotFound(String),
    /// Request payload failed validation
    Validation {
        message: String,
        errors: Option<String>,
    },
    /// Unique key already taken
    Conflict(String),
    /// Request body over the size cap
    PayloadTooLarge(String),
    /// Client exceeded the rate limit
    TooManyRequests(String),
    /// Anything else; `message` is safe for clients, `cause` is only logged
    Internal { message: String, cause: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            errors: None,
        }
    }

    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Forbidden(_) => codes::FORBIDDEN,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::PayloadTooLarge(_) => codes::PAYLOAD_TOO_LARGE,
            AppError::TooManyRequests(_) => codes::RATE_LIMITED,
            AppError::Internal { .. } => codes::INTERNAL_ERROR,
        }
    }

    /// Get the client-facing message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::TooManyRequests(msg) => msg,
            AppError::Validation { message, .. } => message,
            AppError::Internal { message, .. } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Internal { message, cause } => {
                write!(f, "{}: {} ({})", self.error_code(), message, cause)
            }
            _ => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::Internal(cause) => AppError::Internal {
                message: "Internal Server Error".to_string(),
                cause,
            },
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let errors = match error {
            AppError::Validation { errors, .. } => errors.clone(),
            _ => None,
        };

        Self {
            message: error.message().to_string(),
            code: error.error_code().to_string(),
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_cause_is_not_exposed() {
        let err = AppError::internal("Failed to fetch services", "lock poisoned at store.rs:42");
        let body = ErrorResponse::new(&err);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Failed to fetch services");
        assert_eq!(body.code, codes::INTERNAL_ERROR);
        assert!(body.errors.is_none());
        assert!(err.to_string().contains("lock poisoned"));
    }

    #[test]
    fn test_validation_carries_details() {
        let err = AppError::Validation {
            message: "Invalid form data".to_string(),
            errors: Some("email: Email is required".to_string()),
        };
        let body = serde_json::to_value(ErrorResponse::new(&err)).unwrap();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid form data");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["errors"], "email: Email is required");
    }

    #[test]
    fn test_store_errors_map_to_http() {
        let conflict: AppError = StoreError::Conflict("Slug taken".to_string()).into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(conflict.message(), "Slug taken");

        let internal: AppError = StoreError::Internal("boom".to_string()).into();
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message(), "Internal Server Error");
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = AppError::PayloadTooLarge("Request body too large".to_string());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error_code(), codes::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_not_found_body_omits_errors_field() {
        let err = AppError::NotFound("Service not found".to_string());
        let body = serde_json::to_value(ErrorResponse::new(&err)).unwrap();
        assert_eq!(body["message"], "Service not found");
        assert!(body.get("errors").is_none());
    }
}
