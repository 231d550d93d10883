//! Handlers for `/events/{event_id}/fights`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fms_core::types::DbId;
use fms_db::models::fight::{CreateFight, Fight, FightView, ReorderFights, UpdateFight};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/events/{event_id}/fights
pub async fn create(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateFight>,
) -> AppResult<(StatusCode, Json<Fight>)> {
    let fight = state.fight_card().create(event_id, &input).await?;
    Ok((StatusCode::CREATED, Json(fight)))
}

/// GET /api/v1/events/{event_id}/fights
///
/// Returns the card in running order.
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<FightView>>> {
    Ok(Json(state.fight_card().list(event_id).await?))
}

/// GET /api/v1/events/{event_id}/fights/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<FightView>> {
    Ok(Json(state.fight_card().get(event_id, id).await?))
}

/// PUT /api/v1/events/{event_id}/fights/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateFight>,
) -> AppResult<Json<Fight>> {
    Ok(Json(state.fight_card().update(event_id, id, &input).await?))
}

/// DELETE /api/v1/events/{event_id}/fights/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    state.fight_card().delete(event_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/events/{event_id}/fights/reorder
///
/// Returns the whole card in its new order.
pub async fn reorder(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<ReorderFights>,
) -> AppResult<Json<Vec<FightView>>> {
    Ok(Json(
        state.fight_card().reorder(event_id, &input.fights).await?,
    ))
}
