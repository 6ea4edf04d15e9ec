//! Event API endpoints.

use axum::{extract::State, Json};

use super::{store_failure, ApiResult};
use crate::models::Event;
use crate::AppState;

/// GET /api/events - List active events, soonest first.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<Event>> {
    let events = state
        .store
        .list_events()
        .await
        .map_err(|e| store_failure("Failed to fetch events", e))?;

    Ok(Json(events))
}
