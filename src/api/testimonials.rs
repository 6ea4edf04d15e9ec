//! Testimonial API endpoints.

use axum::{extract::State, Json};

use super::{store_failure, ApiResult};
use crate::models::Testimonial;
use crate::AppState;

/// GET /api/testimonials - List active testimonials.
pub async fn list_testimonials(State(state): State<AppState>) -> ApiResult<Vec<Testimonial>> {
    let testimonials = state
        .store
        .list_testimonials()
        .await
        .map_err(|e| store_failure("Failed to fetch testimonials", e))?;

    Ok(Json(testimonials))
}
