//! Repository for the `events` table.

use fms_core::status::EventStatus;
use fms_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventDetail, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, status_id, discipline, created_at, updated_at";

/// Event columns plus roster and card sizes, for [`EventDetail`].
const DETAIL_COLUMNS: &str = "e.id, e.name, e.status_id, e.discipline, e.created_at, e.updated_at, \
     (SELECT COUNT(*) FROM teams t WHERE t.event_id = e.id) AS team_count, \
     (SELECT COUNT(*) FROM participants p WHERE p.event_id = e.id) AS participant_count, \
     (SELECT COUNT(*) FROM fights f WHERE f.event_id = e.id) AS fight_count";

/// Provides CRUD operations for events plus the status compare-and-set.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event in `Draft`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (name, status_id, discipline)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.name)
            .bind(EventStatus::Draft.id())
            .bind(Json(&input.discipline))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event together with its team, participant and fight counts.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<EventDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} FROM events e WHERE e.id = $1");
        sqlx::query_as::<_, EventDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<EventDetail>, sqlx::Error> {
        let query =
            format!("SELECT {DETAIL_COLUMNS} FROM events e ORDER BY e.created_at DESC, e.id DESC");
        sqlx::query_as::<_, EventDetail>(&query).fetch_all(pool).await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update name and/or discipline. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                name = COALESCE($2, name),
                discipline = COALESCE($3, discipline)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.discipline.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Move an event from `from` to `to`, but only if it is still in `from`.
    ///
    /// Returns `None` when the row is missing or its status already moved,
    /// so two concurrent transitions cannot both succeed.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: EventStatus,
        to: EventStatus,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET status_id = $3
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .fetch_optional(pool)
            .await
    }

    /// Delete an event and, by cascade, its whole roster and card.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
