//! Result attachment.

use fms_core::error::CoreError;
use fms_core::fight_result;
use fms_core::types::DbId;
use fms_db::models::fight_result::{CreateFightResult, FightResult};
use fms_db::repositories::{FightRepo, FightResultRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::is_unique_violation;

const UQ_FIGHT_ID: &str = "uq_fight_results_fight_id";

pub struct ResultService {
    pool: PgPool,
}

impl ResultService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record the one result a fight may carry. The fight's status is not
    /// checked; sequencing the finish is live control's job.
    pub async fn attach(
        &self,
        event_id: DbId,
        fight_id: DbId,
        input: &CreateFightResult,
    ) -> AppResult<FightResult> {
        if FightRepo::find_in_event(&self.pool, event_id, fight_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Fight",
                id: fight_id,
            }));
        }
        input.validate()?;

        let existing = FightResultRepo::find_by_fight(&self.pool, fight_id).await?;
        fight_result::validate_not_recorded(fight_id, existing.is_some())?;

        match FightResultRepo::create(&self.pool, fight_id, input).await {
            Ok(result) => {
                tracing::info!(
                    event_id,
                    fight_id,
                    outcome = %result.outcome,
                    "Fight result recorded"
                );
                Ok(result)
            }
            Err(err) if is_unique_violation(&err, UQ_FIGHT_ID) => {
                Err(fight_result::result_exists(fight_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
