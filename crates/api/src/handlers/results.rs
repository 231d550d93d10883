//! Handler for attaching a fight result.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fms_core::types::DbId;
use fms_db::models::fight_result::{CreateFightResult, FightResult};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/events/{event_id}/fights/{id}/result
pub async fn attach(
    State(state): State<AppState>,
    Path((event_id, fight_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateFightResult>,
) -> AppResult<(StatusCode, Json<FightResult>)> {
    let result = state.results().attach(event_id, fight_id, &input).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
