//! Team entity model and DTOs.

use fms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub event_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A team with the number of participants currently assigned to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub team: Team,
    pub participant_count: i64,
}

/// DTO for creating or renaming a team. The event comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeam {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

pub type UpdateTeam = CreateTeam;
