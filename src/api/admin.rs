//! Staff-only endpoints, mounted behind the admin key guard.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{store_failure, ApiResult};
use crate::errors::AppError;
use crate::models::{EntityId, Inquiry};
use crate::AppState;

/// GET /api/admin/inquiries - All inquiries, newest first.
pub async fn list_inquiries(State(state): State<AppState>) -> ApiResult<Vec<Inquiry>> {
    let inquiries = state
        .store
        .list_inquiries()
        .await
        .map_err(|e| store_failure("Failed to fetch inquiries", e))?;

    Ok(Json(inquiries))
}

/// GET /api/admin/inquiries/{id} - One inquiry by id.
pub async fn get_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Inquiry> {
    let not_found = || AppError::NotFound("Inquiry not found".to_string());

    let Ok(id) = id.parse::<EntityId>() else {
        return Err(not_found());
    };

    state
        .store
        .get_inquiry(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}
