//! Request handlers.
//!
//! Handlers stay thin: extract path and body, call the matching engine
//! service from [`AppState`](crate::state::AppState), and pick the status
//! code. All rules live in the services and `fms_core`.

pub mod events;
pub mod fights;
pub mod participants;
pub mod results;
pub mod status;
pub mod teams;
