pub mod events;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /status                                          version, mode, server time
///
/// /events                                          list, create
/// /events/{id}                                     get, update, delete
/// /events/{id}/status                              transition (PATCH)
/// /events/{id}/snapshot                            full card snapshot
///
/// /events/{event_id}/teams                         list, create
/// /events/{event_id}/teams/{id}                    get, update, delete
/// /events/{event_id}/participants                  list, create
/// /events/{event_id}/participants/{id}             get, update, delete
/// /events/{event_id}/fights                        list, create
/// /events/{event_id}/fights/reorder                reorder (PUT)
/// /events/{event_id}/fights/{id}                   get, update, delete
/// /events/{event_id}/fights/{id}/result            attach result (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::status::get_status))
        .nest("/events", events::router())
}
