//! Repository for the `participants` table.

use fms_core::status::FightStatus;
use fms_core::types::DbId;
use sqlx::PgPool;

use crate::models::participant::{
    CreateParticipant, Participant, ParticipantView, UpdateParticipant,
};

const COLUMNS: &str = "id, event_id, team_id, name, weight, created_at, updated_at";

const VIEW_COLUMNS: &str = "p.id, p.event_id, p.team_id, p.name, p.weight, p.created_at, \
     p.updated_at, t.name AS team_name";

/// Participants are always addressed through their event.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a participant. The caller has already checked that
    /// `input.team_id`, if set, belongs to `event_id`.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants (event_id, team_id, name, weight)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(event_id)
            .bind(input.team_id)
            .bind(&input.name)
            .bind(input.weight)
            .fetch_one(pool)
            .await
    }

    pub async fn find_in_event(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<ParticipantView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM participants p
             LEFT JOIN teams t ON t.id = p.team_id
             WHERE p.id = $1 AND p.event_id = $2"
        );
        sqlx::query_as::<_, ParticipantView>(&query)
            .bind(id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists_in_event(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM participants WHERE id = $1 AND event_id = $2)",
        )
        .bind(id)
        .bind(event_id)
        .fetch_one(pool)
        .await
    }

    /// List an event's participants ordered by name, with team names.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<ParticipantView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS}
             FROM participants p
             LEFT JOIN teams t ON t.id = p.team_id
             WHERE p.event_id = $1
             ORDER BY p.name ASC, p.id ASC"
        );
        sqlx::query_as::<_, ParticipantView>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Replace name, weight and team. Returns `None` if the participant is
    /// not in `event_id`.
    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateParticipant,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE participants SET
                name = $3,
                weight = $4,
                team_id = $5
             WHERE id = $1 AND event_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(event_id)
            .bind(&input.name)
            .bind(input.weight)
            .bind(input.team_id)
            .fetch_optional(pool)
            .await
    }

    /// Statuses of every fight naming this participant in either corner.
    pub async fn fight_statuses(pool: &PgPool, id: DbId) -> Result<Vec<FightStatus>, sqlx::Error> {
        let ids: Vec<i16> = sqlx::query_scalar(
            "SELECT status_id FROM fights
             WHERE participant_a_id = $1 OR participant_b_id = $1",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        ids.into_iter()
            .map(|id| FightStatus::try_from(id).map_err(|e| sqlx::Error::Decode(e.into())))
            .collect()
    }

    /// Delete a participant along with any cancelled fights naming them.
    ///
    /// Runs in one transaction. If a live fight still references the
    /// participant the foreign key rejects the delete and nothing is
    /// removed. Returns `true` if the participant row was removed.
    pub async fn delete(pool: &PgPool, event_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM fights
             WHERE event_id = $1
               AND (participant_a_id = $2 OR participant_b_id = $2)
               AND status_id = $3",
        )
        .bind(event_id)
        .bind(id)
        .bind(FightStatus::Cancelled.id())
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM participants WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
