//! Service API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{store_failure, ApiResult};
use crate::errors::AppError;
use crate::models::Service;
use crate::AppState;

/// GET /api/services - List active services.
pub async fn list_services(State(state): State<AppState>) -> ApiResult<Vec<Service>> {
    let services = state
        .store
        .list_services()
        .await
        .map_err(|e| store_failure("Failed to fetch services", e))?;

    Ok(Json(services))
}

/// GET /api/services/{slug} - Get an active service by slug.
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Service> {
    match state.store.get_service_by_slug(&slug).await {
        Ok(Some(service)) => Ok(Json(service)),
        Ok(None) => Err(AppError::NotFound("Service not found".to_string())),
        Err(e) => Err(store_failure("Failed to fetch service", e)),
    }
}
