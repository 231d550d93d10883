//! Participant entity model and DTOs.

use fms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `participants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub event_id: DbId,
    /// Must reference a team of the same event; nulled if the team is deleted.
    pub team_id: Option<DbId>,
    pub name: String,
    pub weight: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A participant with its team's name for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParticipantView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub participant: Participant,
    pub team_name: Option<String>,
}

/// DTO for creating a participant. The event comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParticipant {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: Option<f64>,
    pub team_id: Option<DbId>,
}

/// DTO for updating a participant.
///
/// Full replacement: an omitted `weight` or `team_id` clears the stored
/// value, which is how a participant leaves a team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateParticipant {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: Option<f64>,
    pub team_id: Option<DbId>,
}
