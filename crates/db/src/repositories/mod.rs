//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that must run inside a
//! caller-owned transaction take `&mut PgConnection` instead.

pub mod event_repo;
pub mod fight_repo;
pub mod fight_result_repo;
pub mod participant_repo;
pub mod team_repo;

pub use event_repo::EventRepo;
pub use fight_repo::FightRepo;
pub use fight_result_repo::FightResultRepo;
pub use participant_repo::ParticipantRepo;
pub use team_repo::TeamRepo;
