//! Fight result rules.

use crate::error::CoreError;
use crate::status::FightOutcome;
use crate::types::DbId;

/// Participant credited with the win, `None` for a draw.
pub fn winner(outcome: FightOutcome, participant_a_id: DbId, participant_b_id: DbId) -> Option<DbId> {
    match outcome {
        FightOutcome::WinnerA => Some(participant_a_id),
        FightOutcome::WinnerB => Some(participant_b_id),
        FightOutcome::Draw => None,
    }
}

/// A fight carries at most one result; replacing it is not supported.
pub fn validate_not_recorded(fight_id: DbId, already_recorded: bool) -> Result<(), CoreError> {
    if already_recorded {
        Err(result_exists(fight_id))
    } else {
        Ok(())
    }
}

pub fn result_exists(fight_id: DbId) -> CoreError {
    CoreError::Conflict(format!("Fight {fight_id} already has a result"))
}
