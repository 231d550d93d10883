//! Repository for the `fights` table.
//!
//! Card ordering is protected by `uq_fights_event_order`. Reorders lock
//! the card with [`FightRepo::lock_card`] and write positions with
//! [`FightRepo::assign_order_numbers`] inside a caller-owned transaction.

use std::collections::HashMap;

use fms_core::status::FightStatus;
use fms_core::types::{DbId, OrderNumber};
use sqlx::{PgConnection, PgPool};

use crate::models::fight::{CreateFight, Fight, FightView, FightWithNames, UpdateFight};
use crate::repositories::FightResultRepo;

const COLUMNS: &str = "id, event_id, participant_a_id, participant_b_id, order_number, status_id, \
     created_at, updated_at";

const NAMED_SELECT: &str = "SELECT f.id, f.event_id, f.participant_a_id, f.participant_b_id, \
     f.order_number, f.status_id, f.created_at, f.updated_at, \
     pa.name AS participant_a_name, pb.name AS participant_b_name \
     FROM fights f \
     JOIN participants pa ON pa.id = f.participant_a_id \
     JOIN participants pb ON pb.id = f.participant_b_id";

/// Fights are always addressed through their event.
pub struct FightRepo;

impl FightRepo {
    /// Insert a `Scheduled` fight. A taken order number surfaces as a
    /// unique violation on `uq_fights_event_order`.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateFight,
    ) -> Result<Fight, sqlx::Error> {
        let query = format!(
            "INSERT INTO fights (event_id, participant_a_id, participant_b_id, order_number, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(event_id)
            .bind(input.participant_a_id)
            .bind(input.participant_b_id)
            .bind(input.order_number)
            .bind(FightStatus::Scheduled.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_in_event(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<Fight>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fights WHERE id = $1 AND event_id = $2");
        sqlx::query_as::<_, Fight>(&query)
            .bind(id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Id of the fight holding `order_number` on the card, if any.
    pub async fn order_number_holder(
        pool: &PgPool,
        event_id: DbId,
        order_number: OrderNumber,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM fights WHERE event_id = $1 AND order_number = $2",
        )
        .bind(event_id)
        .bind(order_number)
        .fetch_optional(pool)
        .await
    }

    /// The card in running order.
    pub async fn list_by_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Fight>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fights
             WHERE event_id = $1
             ORDER BY order_number ASC"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// The card in running order with participant names and results.
    pub async fn list_views(pool: &PgPool, event_id: DbId) -> Result<Vec<FightView>, sqlx::Error> {
        let query = format!("{NAMED_SELECT} WHERE f.event_id = $1 ORDER BY f.order_number ASC");
        let fights = sqlx::query_as::<_, FightWithNames>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await?;

        let mut results: HashMap<DbId, _> = FightResultRepo::list_by_event(pool, event_id)
            .await?
            .into_iter()
            .map(|r| (r.fight_id, r))
            .collect();

        Ok(fights
            .into_iter()
            .map(|f| {
                let result = results.remove(&f.fight.id);
                FightView::new(f, result)
            })
            .collect())
    }

    pub async fn find_view(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
    ) -> Result<Option<FightView>, sqlx::Error> {
        let query = format!("{NAMED_SELECT} WHERE f.id = $1 AND f.event_id = $2");
        let Some(fight) = sqlx::query_as::<_, FightWithNames>(&query)
            .bind(id)
            .bind(event_id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let result = FightResultRepo::find_by_fight(pool, id).await?;
        Ok(Some(FightView::new(fight, result)))
    }

    /// Re-pair a fight that is still `Scheduled`.
    ///
    /// Returns `None` if the fight is missing or has left `Scheduled`, so a
    /// fight that went live after the caller's check is never re-paired.
    pub async fn update_participants(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        input: &UpdateFight,
    ) -> Result<Option<Fight>, sqlx::Error> {
        let query = format!(
            "UPDATE fights SET
                participant_a_id = $3,
                participant_b_id = $4
             WHERE id = $1 AND event_id = $2 AND status_id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(id)
            .bind(event_id)
            .bind(input.participant_a_id)
            .bind(input.participant_b_id)
            .bind(FightStatus::Scheduled.id())
            .fetch_optional(pool)
            .await
    }

    /// Delete a fight if its status is one of `deletable`. Its result, if
    /// any, goes with it. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        deletable: &[FightStatus],
    ) -> Result<bool, sqlx::Error> {
        let status_ids: Vec<i16> = deletable.iter().map(|s| s.id()).collect();
        let result = sqlx::query(
            "DELETE FROM fights WHERE id = $1 AND event_id = $2 AND status_id = ANY($3)",
        )
        .bind(id)
        .bind(event_id)
        .bind(&status_ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a fight from `expected` to `next` only if it is still in
    /// `expected`. Live control calls this after checking the transition
    /// table; `None` means the fight is missing or another writer moved it.
    pub async fn compare_and_set_status(
        pool: &PgPool,
        event_id: DbId,
        id: DbId,
        expected: FightStatus,
        next: FightStatus,
    ) -> Result<Option<Fight>, sqlx::Error> {
        let query = format!(
            "UPDATE fights SET status_id = $4
             WHERE id = $1 AND event_id = $2 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(id)
            .bind(event_id)
            .bind(expected.id())
            .bind(next.id())
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Reorder (caller-owned transaction)
    // -----------------------------------------------------------------------

    /// Lock every fight of the card for the rest of the transaction.
    ///
    /// Concurrent reorders of the same card queue here, so each one plans
    /// against the committed result of the previous. Rows are locked in id
    /// order, which does not change between phases, so two lockers never
    /// deadlock on each other.
    pub async fn lock_card(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<Vec<Fight>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fights
             WHERE event_id = $1
             ORDER BY id ASC
             FOR UPDATE"
        );
        sqlx::query_as::<_, Fight>(&query)
            .bind(event_id)
            .fetch_all(conn)
            .await
    }

    /// Write `(fight_id, order_number)` pairs in a single statement.
    ///
    /// The unique index is checked row by row, so the new values must be
    /// disjoint from every position held by a fight not in `moves` and from
    /// each other. Returns the number of rows written.
    pub async fn assign_order_numbers(
        conn: &mut PgConnection,
        event_id: DbId,
        moves: &[(DbId, OrderNumber)],
    ) -> Result<u64, sqlx::Error> {
        let (ids, orders): (Vec<DbId>, Vec<OrderNumber>) = moves.iter().copied().unzip();
        let result = sqlx::query(
            "UPDATE fights f SET order_number = v.order_number
             FROM UNNEST($2::bigint[], $3::integer[]) AS v(id, order_number)
             WHERE f.id = v.id AND f.event_id = $1",
        )
        .bind(event_id)
        .bind(&ids)
        .bind(&orders)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
