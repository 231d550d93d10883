//! Repository for the `teams` table.

use fms_core::types::DbId;
use sqlx::PgPool;

use crate::models::team::{CreateTeam, Team, TeamWithCount, UpdateTeam};

const COLUMNS: &str = "id, event_id, name, created_at, updated_at";

const COUNT_COLUMNS: &str = "t.id, t.event_id, t.name, t.created_at, t.updated_at, \
     (SELECT COUNT(*) FROM participants p WHERE p.team_id = t.id) AS participant_count";

/// Teams are always addressed through their event.
pub struct TeamRepo;

impl TeamRepo {
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateTeam,
    ) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (event_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(event_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a team of `event_id`. A team of another event is reported as
    /// missing.
    pub async fn find_in_event(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<TeamWithCount>, sqlx::Error> {
        let query =
            format!("SELECT {COUNT_COLUMNS} FROM teams t WHERE t.id = $1 AND t.event_id = $2");
        sqlx::query_as::<_, TeamWithCount>(&query)
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
            "SELECT EXISTS (SELECT 1 FROM teams WHERE id = $1 AND event_id = $2)",
        )
        .bind(id)
        .bind(event_id)
        .fetch_one(pool)
        .await
    }

    /// List an event's teams ordered by name.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<TeamWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNT_COLUMNS} FROM teams t
             WHERE t.event_id = $1
             ORDER BY t.name ASC, t.id ASC"
        );
        sqlx::query_as::<_, TeamWithCount>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET name = $3
             WHERE id = $1 AND event_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(event_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team. Its participants stay in the event with `team_id`
    /// nulled by the foreign key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, event_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
