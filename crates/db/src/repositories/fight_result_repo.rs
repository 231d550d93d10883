//! Repository for the `fight_results` table.

use fms_core::types::DbId;
use sqlx::PgPool;

use crate::models::fight_result::{CreateFightResult, FightResult};

const COLUMNS: &str = "id, fight_id, outcome_id, method, notes, created_at, updated_at";

pub struct FightResultRepo;

impl FightResultRepo {
    /// Attach a result. A second result for the same fight fails on
    /// `uq_fight_results_fight_id`.
    pub async fn create(
        pool: &PgPool,
        fight_id: DbId,
        input: &CreateFightResult,
    ) -> Result<FightResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO fight_results (fight_id, outcome_id, method, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FightResult>(&query)
            .bind(fight_id)
            .bind(input.outcome.id())
            .bind(&input.method)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_fight(
        pool: &PgPool,
        fight_id: DbId,
    ) -> Result<Option<FightResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fight_results WHERE fight_id = $1");
        sqlx::query_as::<_, FightResult>(&query)
            .bind(fight_id)
            .fetch_optional(pool)
            .await
    }

    /// Every result recorded on an event's card.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<FightResult>, sqlx::Error> {
        sqlx::query_as::<_, FightResult>(
            "SELECT r.id, r.fight_id, r.outcome_id, r.method, r.notes, r.created_at, r.updated_at
             FROM fight_results r
             JOIN fights f ON f.id = r.fight_id
             WHERE f.event_id = $1",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }
}
