//! Fight entity model and DTOs.

use fms_core::fight_card::{CardSlot, ReorderAssignment};
use fms_core::fight_result;
use fms_core::status::FightStatus;
use fms_core::types::{DbId, OrderNumber, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::fight_result::FightResult;

/// A row from the `fights` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fight {
    pub id: DbId,
    pub event_id: DbId,
    pub participant_a_id: DbId,
    pub participant_b_id: DbId,
    pub order_number: OrderNumber,
    #[sqlx(rename = "status_id", try_from = "i16")]
    pub status: FightStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Fight {
    pub fn slot(&self) -> CardSlot {
        CardSlot {
            fight_id: self.id,
            order_number: self.order_number,
            status: self.status,
        }
    }
}

/// A fight joined with both corners' names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FightWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fight: Fight,
    pub participant_a_name: String,
    pub participant_b_name: String,
}

/// A fight as shown on the card: names plus the result, if recorded.
#[derive(Debug, Clone, Serialize)]
pub struct FightView {
    #[serde(flatten)]
    pub fight: FightWithNames,
    pub result: Option<FightResult>,
    /// Participant credited with the win; `None` for a draw or no result.
    pub winner_id: Option<DbId>,
}

impl FightView {
    pub fn new(fight: FightWithNames, result: Option<FightResult>) -> Self {
        let winner_id = result.as_ref().and_then(|r| {
            fight_result::winner(
                r.outcome,
                fight.fight.participant_a_id,
                fight.fight.participant_b_id,
            )
        });
        Self {
            fight,
            result,
            winner_id,
        }
    }
}

/// DTO for adding a fight to the card. New fights start `Scheduled`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFight {
    pub participant_a_id: DbId,
    pub participant_b_id: DbId,
    pub order_number: OrderNumber,
}

/// DTO for re-pairing a scheduled fight. The order number only changes
/// through a reorder.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFight {
    pub participant_a_id: DbId,
    pub participant_b_id: DbId,
}

/// Body of `PUT /events/{event_id}/fights/reorder`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderFights {
    pub fights: Vec<ReorderAssignment>,
}
