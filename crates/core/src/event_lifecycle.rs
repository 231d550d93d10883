//! Event status guard.
//!
//! Events move `Draft -> Active -> Completed` and never go back. The guard
//! is advisory: it does not lock roster or card edits on a completed
//! event.

use crate::error::CoreError;
use crate::status::EventStatus;

/// Whether `from -> to` is one of the two allowed forward steps.
pub fn can_transition(from: EventStatus, to: EventStatus) -> bool {
    next_statuses(from).contains(&to)
}

/// Statuses reachable from `from` in one step.
pub fn next_statuses(from: EventStatus) -> &'static [EventStatus] {
    match from {
        EventStatus::Draft => &[EventStatus::Active],
        EventStatus::Active => &[EventStatus::Completed],
        EventStatus::Completed => &[],
    }
}

/// Validate a transition, returning [`CoreError::InvalidTransition`] with
/// the attempted pair on rejection.
pub fn validate_transition(from: EventStatus, to: EventStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}
