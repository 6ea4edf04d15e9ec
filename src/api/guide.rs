//! Care guide download endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::{oversized_body, ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::mail::templates;
use crate::AppState;

/// Body of a guide request.
#[derive(Debug, Deserialize, Validate)]
pub struct GuideRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
}

/// POST /api/guide-download - Email the senior care options guide.
///
/// Does not touch the store.
pub async fn request_guide(
    State(state): State<AppState>,
    payload: Result<Json<GuideRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => match oversized_body(&rejection) {
            Some(err) => return Err(err),
            None => GuideRequest { email: None },
        },
    };

    let has_email = request
        .email
        .as_deref()
        .is_some_and(|email| !email.trim().is_empty());
    if !has_email {
        return Err(AppError::validation("Email is required"));
    }
    if let Err(errors) = request.validate() {
        return Err(AppError::Validation {
            message: "Email must be a valid address".to_string(),
            errors: Some(super::describe_validation(&errors)),
        });
    }

    let to = request.email.unwrap_or_default();
    state
        .mailer
        .send(templates::care_guide(&to, &state.config.guide_pdf_url))
        .await
        .map_err(|e| AppError::internal("Failed to send guide", e))?;

    tracing::info!(to = %to, "Care guide sent");
    Ok(Json(MessageResponse::new("Guide sent successfully")))
}
