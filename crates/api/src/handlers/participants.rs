//! Handlers for `/events/{event_id}/participants`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fms_core::types::DbId;
use fms_db::models::participant::{
    CreateParticipant, Participant, ParticipantView, UpdateParticipant,
};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/events/{event_id}/participants
pub async fn create(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateParticipant>,
) -> AppResult<(StatusCode, Json<Participant>)> {
    let participant = state.roster().create_participant(event_id, &input).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// GET /api/v1/events/{event_id}/participants
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<ParticipantView>>> {
    Ok(Json(state.roster().list_participants(event_id).await?))
}

/// GET /api/v1/events/{event_id}/participants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ParticipantView>> {
    Ok(Json(state.roster().get_participant(event_id, id).await?))
}

/// PUT /api/v1/events/{event_id}/participants/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateParticipant>,
) -> AppResult<Json<Participant>> {
    Ok(Json(
        state.roster().update_participant(event_id, id, &input).await?,
    ))
}

/// DELETE /api/v1/events/{event_id}/participants/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.roster().delete_participant(event_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
