//! Roster rules: team scoping and participant removal.

use crate::error::{CoreError, FieldErrors};
use crate::status::FightStatus;
use crate::types::DbId;

pub const FIELD_TEAM_ID: &str = "team_id";
pub const FIELD_PARTICIPANT: &str = "participant";

/// Check that a requested team belongs to the participant's event.
///
/// `team_in_event` is the store's answer for `(team_id, event_id)`; it is
/// ignored when no team was requested.
pub fn validate_team_scope(team_id: Option<DbId>, team_in_event: bool) -> Result<(), CoreError> {
    let mut errors = FieldErrors::default();
    if team_id.is_some() && !team_in_event {
        errors.add(FIELD_TEAM_ID, "Team does not exist in this event");
    }
    errors.into_result()
}

/// Whether a fight in `status` still holds its participants.
///
/// Only a cancelled fight releases them; scheduled, live and finished bouts
/// all keep their corners so a completed card is never orphaned.
pub fn fight_engages_participants(status: FightStatus) -> bool {
    status != FightStatus::Cancelled
}

/// Guard participant deletion given the statuses of every fight naming them.
pub fn validate_participant_removal(
    fight_statuses: impl IntoIterator<Item = FightStatus>,
) -> Result<(), CoreError> {
    let engaged = fight_statuses
        .into_iter()
        .filter(|s| fight_engages_participants(*s))
        .count();
    if engaged == 0 {
        return Ok(());
    }
    Err(CoreError::field(
        FIELD_PARTICIPANT,
        format!(
            "Cannot delete a participant who is assigned to {engaged} active fight(s). \
             Cancel the fights first."
        ),
    ))
}
