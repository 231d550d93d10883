//! Engine services.
//!
//! Each service owns a pool handle and runs one logical operation per
//! method: existence lookups against the store, the pure rules from
//! `fms_core`, then the write. Constraint violations the write can still
//! hit under concurrency are translated here into the same field-keyed
//! errors the rules produce, so handlers only ever see domain errors.

pub mod events;
pub mod fight_card;
pub mod results;
pub mod roster;

pub use events::EventService;
pub use fight_card::FightCardService;
pub use results::ResultService;
pub use roster::RosterService;

use fms_core::error::CoreError;
use fms_core::types::DbId;
use fms_db::repositories::EventRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// `(sqlstate, constraint)` of a database error, if it carries both.
fn violation(err: &sqlx::Error) -> Option<(String, String)> {
    match err {
        sqlx::Error::Database(db) => {
            let code = db.code()?.into_owned();
            let constraint = db.constraint()?.to_string();
            Some((code, constraint))
        }
        _ => None,
    }
}

/// Whether `err` is a unique violation on `constraint`.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(violation(err), Some((code, name)) if code == UNIQUE_VIOLATION && name == constraint)
}

/// Whether `err` is a foreign key violation whose constraint name starts
/// with `prefix`.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error, prefix: &str) -> bool {
    matches!(violation(err), Some((code, name)) if code == FOREIGN_KEY_VIOLATION && name.starts_with(prefix))
}

/// `NotFound` unless the event exists.
pub(crate) async fn ensure_event(pool: &PgPool, event_id: DbId) -> AppResult<()> {
    if EventRepo::exists(pool, event_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))
    }
}
