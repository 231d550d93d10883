//! Event entity model and DTOs.

use fms_core::discipline::DisciplineConfig;
use fms_core::status::EventStatus;
use fms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::fight::FightView;
use crate::models::participant::ParticipantView;
use crate::models::team::TeamWithCount;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "status_id", try_from = "i16")]
    pub status: EventStatus,
    /// Opaque to the card engine; stored as JSONB.
    pub discipline: Json<DisciplineConfig>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An event with the size of its roster and card.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub team_count: i64,
    pub participant_count: i64,
    pub fight_count: i64,
}

/// Everything a display or judge client needs to hydrate an event.
#[derive(Debug, Clone, Serialize)]
pub struct EventSnapshot {
    pub event: Event,
    pub teams: Vec<TeamWithCount>,
    pub participants: Vec<ParticipantView>,
    /// Ordered by `order_number`.
    pub fights: Vec<FightView>,
}

/// DTO for creating an event. New events always start in `Draft`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub discipline: DisciplineConfig,
}

/// DTO for updating an event's name or discipline. Allowed in any status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    pub discipline: Option<DisciplineConfig>,
}

/// Body of `PATCH /events/{id}/status`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TransitionEvent {
    pub status: EventStatus,
}
