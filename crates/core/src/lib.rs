//! Domain logic for the fight management system.
//!
//! Everything in this crate is pure: status enums and their transition
//! tables, field-keyed validation, and reorder planning. Store access lives
//! in `fms-db`, HTTP in `fms-api`.

pub mod discipline;
pub mod error;
pub mod event_lifecycle;
pub mod fight_card;
pub mod fight_result;
pub mod roster;
pub mod status;
pub mod types;
