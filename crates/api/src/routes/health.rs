//! `GET /health`: liveness plus a database round-trip.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Ok,
    /// The server is up but the store did not answer.
    Degraded,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: Health,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// Degraded health is reported as 503 so load balancers treat it as a failure.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match fms_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, Health::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Health::Degraded)
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
