//! Fight result model and DTO.

use fms_core::status::FightOutcome;
use fms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `fight_results` table. At most one per fight.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FightResult {
    pub id: DbId,
    pub fight_id: DbId,
    #[sqlx(rename = "outcome_id", try_from = "i16")]
    pub outcome: FightOutcome,
    pub method: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching a result to a fight.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFightResult {
    pub outcome: FightOutcome,
    #[validate(length(max = 50, message = "Method must be at most 50 characters"))]
    pub method: Option<String>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}
