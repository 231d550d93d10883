//! Fight card rules.
//!
//! Pure validation for building, editing and reordering an event's card.
//! The store answers existence questions; these functions decide what the
//! answers mean and produce field-keyed errors. Reordering is planned here
//! and applied by the service in two committed phases (negated targets,
//! then the real targets) so `(event_id, order_number)` stays unique at
//! every commit.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::{CoreError, FieldErrors};
use crate::status::FightStatus;
use crate::types::{DbId, OrderNumber};

pub const FIELD_PARTICIPANT_A_ID: &str = "participant_a_id";
pub const FIELD_PARTICIPANT_B_ID: &str = "participant_b_id";
pub const FIELD_PARTICIPANTS: &str = "participants";
pub const FIELD_ORDER_NUMBER: &str = "order_number";
pub const FIELD_ORDER_NUMBERS: &str = "order_numbers";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_FIGHTS: &str = "fights";

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Whether live control may move a fight from `from` to `to`.
///
/// `Scheduled -> Announced -> InProgress <-> Paused`, `InProgress ->
/// Finished`, and `Cancelled` from any non-terminal state.
pub fn can_transition(from: FightStatus, to: FightStatus) -> bool {
    use FightStatus::*;
    if to == Cancelled {
        return !is_terminal(from);
    }
    match from {
        Scheduled => to == Announced,
        Announced => to == InProgress,
        InProgress => matches!(to, Paused | Finished),
        Paused => to == InProgress,
        Finished | Cancelled => false,
    }
}

pub fn is_terminal(status: FightStatus) -> bool {
    matches!(status, FightStatus::Finished | FightStatus::Cancelled)
}

pub fn validate_transition(from: FightStatus, to: FightStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::field(
            FIELD_STATUS,
            format!("Cannot move a fight from {from} to {to}"),
        ))
    }
}

/// Participants may only be swapped while the fight is still `Scheduled`.
pub fn validate_editable(status: FightStatus) -> Result<(), CoreError> {
    if status == FightStatus::Scheduled {
        Ok(())
    } else {
        Err(CoreError::field(
            FIELD_STATUS,
            format!("Cannot update a fight with status {status}"),
        ))
    }
}

/// Only fights that never started, or were called off, can be removed.
pub fn validate_deletable(status: FightStatus) -> Result<(), CoreError> {
    match status {
        FightStatus::Scheduled | FightStatus::Cancelled => Ok(()),
        other => Err(CoreError::field(
            FIELD_STATUS,
            format!("Cannot delete a fight with status {other}"),
        )),
    }
}

/// A fight in progress keeps its position on the card.
pub fn can_move(status: FightStatus) -> bool {
    status != FightStatus::InProgress
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

/// Store answers needed to validate a pairing.
#[derive(Debug, Clone, Copy)]
pub struct PairingCheck {
    pub participant_a_id: DbId,
    pub participant_a_in_event: bool,
    pub participant_b_id: DbId,
    pub participant_b_in_event: bool,
}

/// Accumulate every pairing fault rather than stopping at the first.
pub fn validate_pairing(check: &PairingCheck) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if !check.participant_a_in_event {
        errors.add(
            FIELD_PARTICIPANT_A_ID,
            "Participant A does not exist in this event",
        );
    }
    if !check.participant_b_in_event {
        errors.add(
            FIELD_PARTICIPANT_B_ID,
            "Participant B does not exist in this event",
        );
    }
    if check.participant_a_id == check.participant_b_id {
        errors.add(FIELD_PARTICIPANTS, "A participant cannot fight themselves");
    }
    errors
}

/// Validate the request shape of a new fight: the pairing plus a positive
/// order number.
pub fn validate_new_fight(check: &PairingCheck, order_number: OrderNumber) -> Result<(), CoreError> {
    let mut errors = validate_pairing(check);
    if order_number < 1 {
        errors.add(FIELD_ORDER_NUMBER, "Order number must be positive");
    }
    errors.into_result()
}

/// Reject an order number already held by `holder` on the same card.
pub fn validate_order_available(
    order_number: OrderNumber,
    holder: Option<DbId>,
) -> Result<(), CoreError> {
    match holder {
        None => Ok(()),
        Some(_) => Err(order_number_taken(order_number)),
    }
}

/// Error for an order number already used on the card, whether found by
/// lookup or by the unique index rejecting a racing insert.
pub fn order_number_taken(order_number: OrderNumber) -> CoreError {
    CoreError::field(
        FIELD_ORDER_NUMBER,
        format!("Order number {order_number} is already taken"),
    )
}

// ---------------------------------------------------------------------------
// Reorder planning
// ---------------------------------------------------------------------------

/// One requested move on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReorderAssignment {
    pub fight_id: DbId,
    pub new_order_number: OrderNumber,
}

/// A fight as currently stored on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub fight_id: DbId,
    pub order_number: OrderNumber,
    pub status: FightStatus,
}

/// A validated move: `fight_id` goes from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub fight_id: DbId,
    pub from: OrderNumber,
    pub to: OrderNumber,
}

/// A reorder batch that passed validation.
///
/// Staged positions are `-(stage_base + target)`, where `stage_base` is the
/// largest absolute order number on the card when the batch was planned.
/// They are distinct from each other and from every value the card held,
/// leftovers of an interrupted reorder included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    moves: Vec<PlannedMove>,
    stage_base: OrderNumber,
}

impl ReorderPlan {
    pub fn moves(&self) -> &[PlannedMove] {
        &self.moves
    }

    pub fn fight_ids(&self) -> Vec<DbId> {
        self.moves.iter().map(|m| m.fight_id).collect()
    }

    fn staged_position(&self, to: OrderNumber) -> OrderNumber {
        -(self.stage_base + to)
    }

    /// First phase: every fight parked on its staged position.
    pub fn staged(&self) -> impl Iterator<Item = (DbId, OrderNumber)> + '_ {
        self.moves
            .iter()
            .map(|m| (m.fight_id, self.staged_position(m.to)))
    }

    /// Second phase: the real targets.
    pub fn targets(&self) -> impl Iterator<Item = (DbId, OrderNumber)> + '_ {
        self.moves.iter().map(|m| (m.fight_id, m.to))
    }

    /// Fights of this plan still parked on their staged position in `card`.
    ///
    /// The second phase only runs when every fight is; anything less means
    /// another reorder restaged part of the batch in between.
    pub fn still_staged(&self, card: &[CardSlot]) -> Vec<DbId> {
        let positions: HashMap<DbId, OrderNumber> =
            card.iter().map(|s| (s.fight_id, s.order_number)).collect();
        self.moves
            .iter()
            .filter(|m| positions.get(&m.fight_id) == Some(&self.staged_position(m.to)))
            .map(|m| m.fight_id)
            .collect()
    }
}

/// Validate a reorder batch against the current card.
///
/// All faults are collected: unknown fights and in-progress fights under
/// the fight's id, duplicate targets under `order_numbers`, and repeated
/// or empty batches under `fights`. A target held by a fight outside the
/// batch is reported under the moving fight's id, since applying it would
/// trip the card's unique index.
pub fn plan_reorder(
    card: &[CardSlot],
    assignments: &[ReorderAssignment],
) -> Result<ReorderPlan, CoreError> {
    let mut errors = FieldErrors::default();

    if assignments.is_empty() {
        errors.add(FIELD_FIGHTS, "At least one fight must be reordered");
        return Err(CoreError::Validation(errors));
    }

    let by_id: HashMap<DbId, &CardSlot> = card.iter().map(|s| (s.fight_id, s)).collect();

    let mut seen_ids = HashSet::new();
    for a in assignments {
        if !seen_ids.insert(a.fight_id) {
            errors.add(
                FIELD_FIGHTS,
                format!("Fight {} appears more than once", a.fight_id),
            );
        }
    }

    let mut target_counts: HashMap<OrderNumber, usize> = HashMap::new();
    for a in assignments {
        *target_counts.entry(a.new_order_number).or_default() += 1;
    }
    let mut duplicates: Vec<OrderNumber> = target_counts
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(o, _)| *o)
        .collect();
    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        let listed: Vec<String> = duplicates.iter().map(|o| o.to_string()).collect();
        errors.add(
            FIELD_ORDER_NUMBERS,
            format!(
                "Duplicate order numbers are not allowed: {}",
                listed.join(", ")
            ),
        );
    }

    // Staging starts past every value on the card, negative leftovers
    // included, so phase one never meets an occupied position.
    let stage_base = card
        .iter()
        .map(|s| s.order_number.checked_abs().unwrap_or(OrderNumber::MAX))
        .max()
        .unwrap_or(0);

    // Positions held by fights that are not moving in this batch.
    let holders: HashMap<OrderNumber, DbId> = card
        .iter()
        .filter(|s| !seen_ids.contains(&s.fight_id))
        .map(|s| (s.order_number, s.fight_id))
        .collect();

    let mut moves = Vec::with_capacity(assignments.len());
    for a in assignments {
        let key = a.fight_id.to_string();
        let Some(slot) = by_id.get(&a.fight_id) else {
            errors.add(key, "Fight not found in this event");
            continue;
        };

        if !can_move(slot.status) {
            errors.add(key.clone(), "Cannot reorder an in-progress fight");
        }

        if a.new_order_number < 1 {
            errors.add(key, "Order number must be positive");
            continue;
        }

        if let Some(holder) = holders.get(&a.new_order_number) {
            errors.add(
                key.clone(),
                format!(
                    "Order number {} is held by fight {holder}, which is not part of this reorder",
                    a.new_order_number
                ),
            );
        }
        if stage_base.checked_add(a.new_order_number).is_none() {
            errors.add(
                key,
                format!("Order number {} is too large", a.new_order_number),
            );
        }

        moves.push(PlannedMove {
            fight_id: a.fight_id,
            from: slot.order_number,
            to: a.new_order_number,
        });
    }

    errors.into_result()?;
    Ok(ReorderPlan { moves, stage_base })
}

/// Fights left holding a negative (staged) position by an interrupted
/// reorder.
pub fn staged_fights(card: &[CardSlot]) -> Vec<DbId> {
    card.iter()
        .filter(|s| s.order_number < 1)
        .map(|s| s.fight_id)
        .collect()
}

/// Error for a reorder whose first phase hit the card's unique index. The
/// transaction rolled back, so the card is as it was.
pub fn reorder_collided() -> CoreError {
    CoreError::Conflict(
        "The fight card changed while it was being reordered. Retry the reorder.".to_string(),
    )
}

/// Error for a reorder whose second phase failed after the first
/// committed. The named fights hold negated positions until the whole
/// reorder is retried.
pub fn interrupted_reorder(staged: &[DbId]) -> CoreError {
    let listed: Vec<String> = staged.iter().map(|id| id.to_string()).collect();
    CoreError::Conflict(format!(
        "Reorder was interrupted; fights {} hold temporary positions. Retry the reorder.",
        listed.join(", ")
    ))
}
