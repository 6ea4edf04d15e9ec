//! Contact inquiry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// A contact form submission. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub inquiry_type: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an inquiry.
///
/// Carries no `created_at`: the store stamps it, and a `createdAt` key in
/// incoming JSON is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub inquiry_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Inquiry {
    pub fn from_new(id: EntityId, input: NewInquiry, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            inquiry_type: input.inquiry_type,
            message: input.message,
            created_at,
        }
    }
}
