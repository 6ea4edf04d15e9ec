//! Admin API key guard.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the admin API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Admin guard taking the configured key as a parameter.
///
/// With no key configured every request is refused with 403, so admin routes
/// stay closed until someone provisions a key.
pub async fn admin_auth_layer(
    expected_key: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = expected_key else {
        tracing::warn!("Admin route requested but ADMIN_API_KEY is not configured");
        return AppError::Forbidden("Forbidden access".to_string()).into_response();
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        });

    let authorized = matches!(provided, Some(key) if constant_time_compare(key, &expected));

    if authorized {
        next.run(request).await
    } else {
        AppError::Unauthorized("Unauthorized access".to_string()).into_response()
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
