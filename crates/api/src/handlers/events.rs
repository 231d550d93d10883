//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fms_core::types::DbId;
use fms_db::models::event::{
    CreateEvent, Event, EventDetail, EventSnapshot, TransitionEvent, UpdateEvent,
};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state.events().create(&input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<EventDetail>>> {
    Ok(Json(state.events().list().await?))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventDetail>> {
    Ok(Json(state.events().get(id).await?))
}

/// PUT /api/v1/events/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.events().update(id, &input).await?))
}

/// DELETE /api/v1/events/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.events().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/events/{id}/status
pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionEvent>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.events().transition(id, input.status).await?))
}

/// GET /api/v1/events/{id}/snapshot
pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventSnapshot>> {
    Ok(Json(state.events().snapshot(id).await?))
}
