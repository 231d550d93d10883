//! Roster service: teams and participants scoped to an event.

use fms_core::error::CoreError;
use fms_core::roster::{self, FIELD_PARTICIPANT};
use fms_core::types::DbId;
use fms_db::models::participant::{
    CreateParticipant, Participant, ParticipantView, UpdateParticipant,
};
use fms_db::models::team::{CreateTeam, Team, TeamWithCount, UpdateTeam};
use fms_db::repositories::{ParticipantRepo, TeamRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{ensure_event, is_foreign_key_violation};

fn team_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Team", id })
}

fn participant_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Participant",
        id,
    })
}

pub struct RosterService {
    pool: PgPool,
}

impl RosterService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // -- teams --------------------------------------------------------------

    pub async fn list_teams(&self, event_id: DbId) -> AppResult<Vec<TeamWithCount>> {
        ensure_event(&self.pool, event_id).await?;
        Ok(TeamRepo::list_by_event(&self.pool, event_id).await?)
    }

    pub async fn get_team(&self, event_id: DbId, id: DbId) -> AppResult<TeamWithCount> {
        TeamRepo::find_in_event(&self.pool, event_id, id)
            .await?
            .ok_or_else(|| team_not_found(id))
    }

    /// Team names are not unique within an event.
    pub async fn create_team(&self, event_id: DbId, input: &CreateTeam) -> AppResult<Team> {
        ensure_event(&self.pool, event_id).await?;
        input.validate()?;
        let team = TeamRepo::create(&self.pool, event_id, input).await?;
        tracing::info!(event_id, team_id = team.id, "Team created");
        Ok(team)
    }

    pub async fn update_team(
        &self,
        event_id: DbId,
        id: DbId,
        input: &UpdateTeam,
    ) -> AppResult<Team> {
        input.validate()?;
        TeamRepo::update(&self.pool, event_id, id, input)
            .await?
            .ok_or_else(|| team_not_found(id))
    }

    /// Unconditional; members stay in the event without a team.
    pub async fn delete_team(&self, event_id: DbId, id: DbId) -> AppResult<()> {
        if !TeamRepo::delete(&self.pool, event_id, id).await? {
            return Err(team_not_found(id));
        }
        tracing::info!(event_id, team_id = id, "Team deleted");
        Ok(())
    }

    // -- participants -------------------------------------------------------

    pub async fn list_participants(&self, event_id: DbId) -> AppResult<Vec<ParticipantView>> {
        ensure_event(&self.pool, event_id).await?;
        Ok(ParticipantRepo::list_by_event(&self.pool, event_id).await?)
    }

    pub async fn get_participant(&self, event_id: DbId, id: DbId) -> AppResult<ParticipantView> {
        ParticipantRepo::find_in_event(&self.pool, event_id, id)
            .await?
            .ok_or_else(|| participant_not_found(id))
    }

    pub async fn create_participant(
        &self,
        event_id: DbId,
        input: &CreateParticipant,
    ) -> AppResult<Participant> {
        ensure_event(&self.pool, event_id).await?;
        input.validate()?;
        self.check_team_scope(event_id, input.team_id).await?;

        let participant = ParticipantRepo::create(&self.pool, event_id, input).await?;
        tracing::info!(
            event_id,
            participant_id = participant.id,
            team_id = ?participant.team_id,
            "Participant created"
        );
        Ok(participant)
    }

    /// Replace a participant's name, weight and team.
    pub async fn update_participant(
        &self,
        event_id: DbId,
        id: DbId,
        input: &UpdateParticipant,
    ) -> AppResult<Participant> {
        if !ParticipantRepo::exists_in_event(&self.pool, event_id, id).await? {
            return Err(participant_not_found(id));
        }
        input.validate()?;
        self.check_team_scope(event_id, input.team_id).await?;

        ParticipantRepo::update(&self.pool, event_id, id, input)
            .await?
            .ok_or_else(|| participant_not_found(id))
    }

    /// Remove a participant who is not in any live or finished fight.
    ///
    /// Cancelled fights naming them are removed too. A fight created
    /// between the check and the delete is caught by the foreign key and
    /// reported the same way as the check.
    pub async fn delete_participant(&self, event_id: DbId, id: DbId) -> AppResult<()> {
        if !ParticipantRepo::exists_in_event(&self.pool, event_id, id).await? {
            return Err(participant_not_found(id));
        }

        let statuses = ParticipantRepo::fight_statuses(&self.pool, id).await?;
        roster::validate_participant_removal(statuses)?;

        match ParticipantRepo::delete(&self.pool, event_id, id).await {
            Ok(true) => {
                tracing::info!(event_id, participant_id = id, "Participant deleted");
                Ok(())
            }
            Ok(false) => Err(participant_not_found(id)),
            Err(err) if is_foreign_key_violation(&err, "fk_fights_participant") => {
                tracing::warn!(event_id, participant_id = id, "Participant gained a fight during delete");
                Err(AppError::Core(CoreError::field(
                    FIELD_PARTICIPANT,
                    "Cannot delete a participant who is assigned to active fights. \
                     Cancel the fights first.",
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn check_team_scope(&self, event_id: DbId, team_id: Option<DbId>) -> AppResult<()> {
        let team_in_event = match team_id {
            Some(team_id) => TeamRepo::exists_in_event(&self.pool, event_id, team_id).await?,
            None => false,
        };
        roster::validate_team_scope(team_id, team_in_event)?;
        Ok(())
    }
}
