//! Handler for `/status`.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::FmsMode;
use crate::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub mode: FmsMode,
    pub server_time: fms_core::types::Timestamp,
}

/// GET /api/v1/status
///
/// Lets LAN clients confirm which server they reached and its clock.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        mode: state.config.mode,
        server_time: chrono::Utc::now(),
    })
}
