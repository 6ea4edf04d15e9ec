//! Contact inquiry endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::{describe_validation, oversized_body, store_failure};
use crate::errors::AppError;
use crate::mail::templates;
use crate::models::{Inquiry, NewInquiry};
use crate::AppState;

const INVALID_FORM: &str = "Invalid form data";

/// Contact form body as submitted by the site.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquiryForm {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 200, message = "Name must be between 1 and 200 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: Option<String>,
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 100, message = "Inquiry type must be at most 100 characters"))]
    pub inquiry_type: Option<String>,
    #[validate(length(max = 5000, message = "Message must be at most 5000 characters"))]
    pub message: Option<String>,
}

impl InquiryForm {
    /// Validate the form and convert it into store input.
    pub fn into_new_inquiry(self) -> Result<NewInquiry, AppError> {
        self.validate().map_err(|errors| AppError::Validation {
            message: INVALID_FORM.to_string(),
            errors: Some(describe_validation(&errors)),
        })?;

        let (Some(name), Some(email)) = (self.name, self.email) else {
            return Err(AppError::validation(INVALID_FORM));
        };

        Ok(NewInquiry {
            name,
            email,
            phone: self.phone,
            inquiry_type: self.inquiry_type,
            message: self.message,
        })
    }
}

/// POST /api/inquiries - Record a contact form submission.
///
/// The stored inquiry is the source of truth: confirmation and staff
/// notification emails are attempted afterwards and their failures only
/// logged.
pub async fn create_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquiryForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Inquiry>), AppError> {
    let Json(form) = payload.map_err(|rejection| {
        oversized_body(&rejection).unwrap_or_else(|| AppError::Validation {
            message: INVALID_FORM.to_string(),
            errors: Some(rejection.body_text()),
        })
    })?;
    let input = form.into_new_inquiry()?;

    let inquiry = state
        .store
        .create_inquiry(input)
        .await
        .map_err(|e| store_failure("Failed to submit inquiry", e))?;

    tracing::info!(id = inquiry.id, inquiry_type = ?inquiry.inquiry_type, "Inquiry received");

    let emails = [
        templates::inquiry_confirmation(&inquiry),
        templates::inquiry_notification(&inquiry, &state.config.admin_email),
    ];
    for email in emails {
        let to = email.to.clone();
        if let Err(e) = state.mailer.send(email).await {
            tracing::warn!(inquiry_id = inquiry.id, to = %to, "Failed to send inquiry email: {}", e);
        }
    }

    Ok((StatusCode::CREATED, Json(inquiry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> InquiryForm {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_form_converts() {
        let input = form(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "inquiryType": "tour"
        }))
        .into_new_inquiry()
        .unwrap();

        assert_eq!(input.name, "Jane Doe");
        assert_eq!(input.inquiry_type.as_deref(), Some("tour"));
        assert!(input.phone.is_none());
    }

    #[test]
    fn test_missing_email_is_reported() {
        let err = form(json!({ "name": "A" })).into_new_inquiry().unwrap_err();
        match err {
            AppError::Validation { message, errors } => {
                assert_eq!(message, INVALID_FORM);
                assert_eq!(errors.as_deref(), Some("email: Email is required"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_bad_email_and_empty_name_are_both_reported() {
        let err = form(json!({ "name": "", "email": "not-an-email" }))
            .into_new_inquiry()
            .unwrap_err();
        let AppError::Validation { errors, .. } = err else {
            panic!("expected validation error");
        };
        let errors = errors.unwrap();
        assert!(errors.contains("email: Email must be a valid address"));
        assert!(errors.contains("name: Name must be between 1 and 200 characters"));
    }

    #[test]
    fn test_overlong_message_is_rejected() {
        let err = form(json!({
            "name": "Jane",
            "email": "jane@example.com",
            "message": "x".repeat(5001)
        }))
        .into_new_inquiry()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
