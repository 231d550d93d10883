//! Fight card service: pairing, editing and reordering fights.

use fms_core::error::CoreError;
use fms_core::fight_card::{
    self, CardSlot, PairingCheck, ReorderAssignment, ReorderPlan, FIELD_PARTICIPANTS,
};
use fms_core::status::FightStatus;
use fms_core::types::{DbId, OrderNumber};
use fms_db::models::fight::{CreateFight, Fight, FightView, UpdateFight};
use fms_db::repositories::{FightRepo, ParticipantRepo};
use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult};
use crate::services::{ensure_event, is_foreign_key_violation, is_unique_violation};

const UQ_EVENT_ORDER: &str = "uq_fights_event_order";
const FK_PARTICIPANT_PREFIX: &str = "fk_fights_participant";

fn fight_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Fight", id })
}

/// A participant removed between the pairing check and the write.
fn participant_vanished() -> AppError {
    AppError::Core(CoreError::field(
        FIELD_PARTICIPANTS,
        "A participant was removed while the fight was being saved",
    ))
}

/// Outcome of a reorder's second phase.
enum Release {
    Committed,
    /// Another reorder restaged part of the batch first; carries the fights
    /// of this batch still on their staged positions.
    Superseded(Vec<DbId>),
}

pub struct FightCardService {
    pool: PgPool,
}

impl FightCardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The card in running order.
    pub async fn list(&self, event_id: DbId) -> AppResult<Vec<FightView>> {
        ensure_event(&self.pool, event_id).await?;
        Ok(FightRepo::list_views(&self.pool, event_id).await?)
    }

    pub async fn get(&self, event_id: DbId, id: DbId) -> AppResult<FightView> {
        FightRepo::find_view(&self.pool, event_id, id)
            .await?
            .ok_or_else(|| fight_not_found(id))
    }

    /// Add a `Scheduled` fight at `order_number`.
    ///
    /// Pairing faults are reported together; the order number is checked
    /// only once the pairing is valid.
    pub async fn create(&self, event_id: DbId, input: &CreateFight) -> AppResult<Fight> {
        ensure_event(&self.pool, event_id).await?;

        let check = self
            .pairing(event_id, input.participant_a_id, input.participant_b_id)
            .await?;
        fight_card::validate_new_fight(&check, input.order_number)?;

        let holder = FightRepo::order_number_holder(&self.pool, event_id, input.order_number).await?;
        fight_card::validate_order_available(input.order_number, holder)?;

        match FightRepo::create(&self.pool, event_id, input).await {
            Ok(fight) => {
                tracing::info!(
                    event_id,
                    fight_id = fight.id,
                    order_number = fight.order_number,
                    "Fight created"
                );
                Ok(fight)
            }
            Err(err) if is_unique_violation(&err, UQ_EVENT_ORDER) => {
                tracing::warn!(event_id, order_number = input.order_number, "Lost order number race");
                Err(fight_card::order_number_taken(input.order_number).into())
            }
            Err(err) if is_foreign_key_violation(&err, FK_PARTICIPANT_PREFIX) => {
                Err(participant_vanished())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Re-pair a `Scheduled` fight. The order number is left alone.
    pub async fn update(&self, event_id: DbId, id: DbId, input: &UpdateFight) -> AppResult<Fight> {
        let fight = FightRepo::find_in_event(&self.pool, event_id, id)
            .await?
            .ok_or_else(|| fight_not_found(id))?;
        fight_card::validate_editable(fight.status)?;

        let check = self
            .pairing(event_id, input.participant_a_id, input.participant_b_id)
            .await?;
        fight_card::validate_pairing(&check).into_result()?;

        match FightRepo::update_participants(&self.pool, event_id, id, input).await {
            Ok(Some(fight)) => {
                tracing::info!(event_id, fight_id = id, "Fight re-paired");
                Ok(fight)
            }
            Ok(None) => {
                // The fight went live or was removed after the status check.
                let now = self.status_of(event_id, id).await?;
                fight_card::validate_editable(now)?;
                Err(AppError::Core(CoreError::Conflict(format!(
                    "Fight {id} changed while it was being updated"
                ))))
            }
            Err(err) if is_foreign_key_violation(&err, FK_PARTICIPANT_PREFIX) => {
                Err(participant_vanished())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove a fight that is `Scheduled` or `Cancelled`.
    pub async fn delete(&self, event_id: DbId, id: DbId) -> AppResult<()> {
        let fight = FightRepo::find_in_event(&self.pool, event_id, id)
            .await?
            .ok_or_else(|| fight_not_found(id))?;
        fight_card::validate_deletable(fight.status)?;

        let deletable = [FightStatus::Scheduled, FightStatus::Cancelled];
        if FightRepo::delete(&self.pool, event_id, id, &deletable).await? {
            tracing::info!(event_id, fight_id = id, "Fight deleted");
            return Ok(());
        }

        let now = self.status_of(event_id, id).await?;
        fight_card::validate_deletable(now)?;
        Err(AppError::Core(CoreError::Conflict(format!(
            "Fight {id} changed while it was being deleted"
        ))))
    }

    /// Reassign order numbers for a batch of fights.
    ///
    /// Phase one locks the card, validates the whole batch and commits every
    /// fight on a staged negative position past anything the card holds.
    /// Phase two locks the card again and commits the real targets, provided
    /// no other reorder restaged the batch in between. Validation failures
    /// leave the card untouched. If phase two cannot run, the fights still
    /// staged are named in a conflict; re-sending the batch completes it.
    pub async fn reorder(
        &self,
        event_id: DbId,
        assignments: &[ReorderAssignment],
    ) -> AppResult<Vec<FightView>> {
        ensure_event(&self.pool, event_id).await?;

        let mut tx = self.pool.begin().await?;
        let card = Self::locked_card(&mut *tx, event_id).await?;

        let leftover = fight_card::staged_fights(&card);
        if !leftover.is_empty() {
            tracing::warn!(event_id, staged = ?leftover, "Card holds fights from an interrupted reorder");
        }

        let plan = match fight_card::plan_reorder(&card, assignments) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!(event_id, error = %err, "Reorder rejected");
                return Err(err.into());
            }
        };

        let staged: Vec<(DbId, OrderNumber)> = plan.staged().collect();
        match FightRepo::assign_order_numbers(&mut *tx, event_id, &staged).await {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err, UQ_EVENT_ORDER) => {
                tracing::warn!(event_id, error = %err, "Reorder staging collided");
                return Err(fight_card::reorder_collided().into());
            }
            Err(err) => return Err(err.into()),
        }
        tx.commit().await?;

        match self.commit_targets(event_id, &plan).await {
            Ok(Release::Committed) => {}
            Ok(Release::Superseded(stranded)) => {
                tracing::warn!(event_id, staged = ?stranded, "Reorder superseded after staging");
                return Err(if stranded.is_empty() {
                    fight_card::reorder_collided()
                } else {
                    fight_card::interrupted_reorder(&stranded)
                }
                .into());
            }
            Err(err) => {
                let fight_ids = plan.fight_ids();
                tracing::warn!(
                    event_id,
                    error = %err,
                    staged = ?fight_ids,
                    "Reorder interrupted after staging"
                );
                return Err(fight_card::interrupted_reorder(&fight_ids).into());
            }
        }

        tracing::info!(event_id, moved = plan.moves().len(), "Fight card reordered");
        Ok(FightRepo::list_views(&self.pool, event_id).await?)
    }

    async fn commit_targets(
        &self,
        event_id: DbId,
        plan: &ReorderPlan,
    ) -> Result<Release, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let card = Self::locked_card(&mut *tx, event_id).await?;

        let parked = plan.still_staged(&card);
        if parked.len() != plan.moves().len() {
            return Ok(Release::Superseded(parked));
        }

        let targets: Vec<(DbId, OrderNumber)> = plan.targets().collect();
        FightRepo::assign_order_numbers(&mut *tx, event_id, &targets).await?;
        tx.commit().await?;
        Ok(Release::Committed)
    }

    async fn locked_card(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<Vec<CardSlot>, sqlx::Error> {
        Ok(FightRepo::lock_card(conn, event_id)
            .await?
            .iter()
            .map(Fight::slot)
            .collect())
    }

    async fn pairing(
        &self,
        event_id: DbId,
        participant_a_id: DbId,
        participant_b_id: DbId,
    ) -> AppResult<PairingCheck> {
        Ok(PairingCheck {
            participant_a_id,
            participant_a_in_event: ParticipantRepo::exists_in_event(
                &self.pool,
                event_id,
                participant_a_id,
            )
            .await?,
            participant_b_id,
            participant_b_in_event: ParticipantRepo::exists_in_event(
                &self.pool,
                event_id,
                participant_b_id,
            )
            .await?,
        })
    }

    async fn status_of(&self, event_id: DbId, id: DbId) -> AppResult<FightStatus> {
        FightRepo::find_in_event(&self.pool, event_id, id)
            .await?
            .map(|f| f.status)
            .ok_or_else(|| fight_not_found(id))
    }
}
