use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{EventService, FightCardService, ResultService, RosterService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fms_db::DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: fms_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn events(&self) -> EventService {
        EventService::new(self.pool.clone())
    }

    pub fn roster(&self) -> RosterService {
        RosterService::new(self.pool.clone())
    }

    pub fn fight_card(&self) -> FightCardService {
        FightCardService::new(self.pool.clone())
    }

    pub fn results(&self) -> ResultService {
        ResultService::new(self.pool.clone())
    }
}
