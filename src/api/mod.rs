//! REST API module.
//!
//! Handlers call one store method each and return bare JSON; failures become
//! an [`AppError`] with a `message` body.

mod admin;
mod events;
mod guide;
mod inquiries;
mod services;
mod testimonials;

pub use admin::*;
pub use events::*;
pub use guide::*;
pub use inquiries::*;
pub use services::*;
pub use testimonials::*;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::errors::AppError;
use crate::store::StoreError;

/// Response type for handlers returning a JSON body.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Body for endpoints that only acknowledge.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Map a store failure to a response, replacing internal detail with `context`.
pub(crate) fn store_failure(context: &str, err: StoreError) -> AppError {
    match err {
        StoreError::Conflict(msg) => AppError::Conflict(msg),
        StoreError::Internal(cause) => AppError::internal(context, cause),
    }
}

/// Body over the size cap, if that is why the JSON extractor gave up.
pub(crate) fn oversized_body(rejection: &JsonRejection) -> Option<AppError> {
    (rejection.status() == StatusCode::PAYLOAD_TOO_LARGE)
        .then(|| AppError::PayloadTooLarge("Request body too large".to_string()))
}

/// Flatten validator output into `field: reason; ...`, sorted for stable output.
pub(crate) fn describe_validation(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
