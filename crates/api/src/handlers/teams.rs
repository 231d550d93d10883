//! Handlers for `/events/{event_id}/teams`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fms_core::types::DbId;
use fms_db::models::team::{CreateTeam, Team, TeamWithCount, UpdateTeam};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/events/{event_id}/teams
pub async fn create(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    let team = state.roster().create_team(event_id, &input).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /api/v1/events/{event_id}/teams
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<TeamWithCount>>> {
    Ok(Json(state.roster().list_teams(event_id).await?))
}

/// GET /api/v1/events/{event_id}/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TeamWithCount>> {
    Ok(Json(state.roster().get_team(event_id, id).await?))
}

/// PUT /api/v1/events/{event_id}/teams/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTeam>,
) -> AppResult<Json<Team>> {
    Ok(Json(state.roster().update_team(event_id, id, &input).await?))
}

/// DELETE /api/v1/events/{event_id}/teams/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.roster().delete_team(event_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
