//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Read views that join in names or counts for display
//! - `Deserialize` + `Validate` DTOs for inserts and updates

pub mod event;
pub mod fight;
pub mod fight_result;
pub mod participant;
pub mod team;
