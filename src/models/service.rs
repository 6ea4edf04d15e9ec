//! Care service model.

use serde::{Deserialize, Serialize};

use super::{EntityId, DEFAULT_IS_ACTIVE};

/// A care offering such as assisted living or memory care.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// External lookup key, unique across all services.
    pub slug: String,
    pub features: Option<Vec<String>>,
    pub is_active: bool,
}

/// Input for creating a service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Service {
    pub fn from_new(id: EntityId, input: NewService) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            image: input.image,
            slug: input.slug,
            features: input.features,
            is_active: input.is_active.unwrap_or(DEFAULT_IS_ACTIVE),
        }
    }
}
