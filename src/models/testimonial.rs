//! Testimonial model shown in the home page slider.

use serde::{Deserialize, Serialize};

use super::{EntityId, DEFAULT_IS_ACTIVE, DEFAULT_TESTIMONIAL_STARS};

/// A quote from a resident or family member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: EntityId,
    pub name: String,
    pub role: Option<String>,
    pub content: String,
    pub image: Option<String>,
    /// Expected to be 1-5; not checked here.
    pub stars: i32,
    pub is_active: bool,
}

/// Input for creating a testimonial.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stars: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Testimonial {
    pub fn from_new(id: EntityId, input: NewTestimonial) -> Self {
        Self {
            id,
            name: input.name,
            role: input.role,
            content: input.content,
            image: input.image,
            stars: input.stars.unwrap_or(DEFAULT_TESTIMONIAL_STARS),
            is_active: input.is_active.unwrap_or(DEFAULT_IS_ACTIVE),
        }
    }
}
