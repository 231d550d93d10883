//! Event lifecycle service.

use fms_core::error::CoreError;
use fms_core::event_lifecycle;
use fms_core::status::EventStatus;
use fms_core::types::DbId;
use fms_db::models::event::{CreateEvent, Event, EventDetail, EventSnapshot, UpdateEvent};
use fms_db::repositories::{EventRepo, FightRepo, ParticipantRepo, TeamRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Event", id })
}

/// Creates events and walks them through `Draft -> Active -> Completed`.
pub struct EventService {
    pool: PgPool,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateEvent) -> AppResult<Event> {
        input.validate()?;
        let event = EventRepo::create(&self.pool, input).await?;
        tracing::info!(event_id = event.id, name = %event.name, "Event created");
        Ok(event)
    }

    pub async fn list(&self) -> AppResult<Vec<EventDetail>> {
        Ok(EventRepo::list(&self.pool).await?)
    }

    pub async fn get(&self, id: DbId) -> AppResult<EventDetail> {
        EventRepo::find_detail(&self.pool, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Rename or reconfigure an event. Allowed in any status.
    pub async fn update(&self, id: DbId, input: &UpdateEvent) -> AppResult<Event> {
        input.validate()?;
        let event = EventRepo::update(&self.pool, id, input)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(event_id = id, "Event updated");
        Ok(event)
    }

    /// Advance the event's status. Only the status column changes; the
    /// roster and card are untouched.
    pub async fn transition(&self, id: DbId, target: EventStatus) -> AppResult<Event> {
        let current = EventRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        event_lifecycle::validate_transition(current.status, target)?;

        match EventRepo::set_status(&self.pool, id, current.status, target).await? {
            Some(event) => {
                tracing::info!(
                    event_id = id,
                    from = %current.status,
                    to = %target,
                    "Event status changed"
                );
                Ok(event)
            }
            None => {
                // Another writer moved (or deleted) the event since the read.
                let now = EventRepo::find_by_id(&self.pool, id)
                    .await?
                    .ok_or_else(|| not_found(id))?;
                tracing::warn!(event_id = id, status = %now.status, "Lost event status race");
                Err(AppError::Core(CoreError::InvalidTransition {
                    from: now.status,
                    to: target,
                }))
            }
        }
    }

    /// Event, roster and ordered card in one payload.
    pub async fn snapshot(&self, id: DbId) -> AppResult<EventSnapshot> {
        let event = EventRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let teams = TeamRepo::list_by_event(&self.pool, id).await?;
        let participants = ParticipantRepo::list_by_event(&self.pool, id).await?;
        let fights = FightRepo::list_views(&self.pool, id).await?;

        Ok(EventSnapshot {
            event,
            teams,
            participants,
            fights,
        })
    }

    /// Delete an event with its teams, participants, fights and results.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !EventRepo::delete(&self.pool, id).await? {
            return Err(not_found(id));
        }
        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }
}
