//! Route definitions for events and their nested roster and card.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{events, fights, participants, results, teams};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{event_id}                         -> get_by_id
/// PUT    /{event_id}                         -> update
/// DELETE /{event_id}                         -> delete
/// PATCH  /{event_id}/status                  -> transition
/// GET    /{event_id}/snapshot                -> snapshot
///
/// GET    /{event_id}/teams                   -> list_by_event
/// POST   /{event_id}/teams                   -> create
/// GET    /{event_id}/teams/{id}              -> get_by_id
/// PUT    /{event_id}/teams/{id}              -> update
/// DELETE /{event_id}/teams/{id}              -> delete
///
/// GET    /{event_id}/participants            -> list_by_event
/// POST   /{event_id}/participants            -> create
/// GET    /{event_id}/participants/{id}       -> get_by_id
/// PUT    /{event_id}/participants/{id}       -> update
/// DELETE /{event_id}/participants/{id}       -> delete
///
/// GET    /{event_id}/fights                  -> list_by_event
/// POST   /{event_id}/fights                  -> create
/// PUT    /{event_id}/fights/reorder          -> reorder
/// GET    /{event_id}/fights/{id}             -> get_by_id
/// PUT    /{event_id}/fights/{id}             -> update
/// DELETE /{event_id}/fights/{id}             -> delete
/// POST   /{event_id}/fights/{id}/result      -> attach
/// ```
///
/// The event segment is `{event_id}` on every route so the nested trees
/// share one parameter name.
pub fn router() -> Router<AppState> {
    let team_routes = Router::new()
        .route("/", get(teams::list_by_event).post(teams::create))
        .route(
            "/{id}",
            get(teams::get_by_id).put(teams::update).delete(teams::delete),
        );

    let participant_routes = Router::new()
        .route(
            "/",
            get(participants::list_by_event).post(participants::create),
        )
        .route(
            "/{id}",
            get(participants::get_by_id)
                .put(participants::update)
                .delete(participants::delete),
        );

    let fight_routes = Router::new()
        .route("/", get(fights::list_by_event).post(fights::create))
        .route("/reorder", put(fights::reorder))
        .route(
            "/{id}",
            get(fights::get_by_id)
                .put(fights::update)
                .delete(fights::delete),
        )
        .route("/{id}/result", post(results::attach));

    Router::new()
        .route("/", get(events::list).post(events::create))
        .route(
            "/{event_id}",
            get(events::get_by_id)
                .put(events::update)
                .delete(events::delete),
        )
        .route("/{event_id}/status", patch(events::transition))
        .route("/{event_id}/snapshot", get(events::snapshot))
        .nest("/{event_id}/teams", team_routes)
        .nest("/{event_id}/participants", participant_routes)
        .nest("/{event_id}/fights", fight_routes)
}
