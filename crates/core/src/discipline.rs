//! Discipline configuration carried on an event.
//!
//! Stored as JSONB and passed through untouched; nothing in the card engine
//! reads it.

use serde::{Deserialize, Serialize};

/// Timer behaviour for fights in a discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    #[default]
    Continuous,
    RoundsBased,
}

/// Points and finish types tracked for a discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub victory_points: i32,
    pub draw_points: i32,
    pub defeat_points: i32,
    pub allow_ko: bool,
    pub allow_tko: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            victory_points: 3,
            draw_points: 1,
            defeat_points: 0,
            allow_ko: false,
            allow_tko: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisciplineConfig {
    pub discipline_name: String,
    pub timer_mode: TimerMode,
    /// Only meaningful for [`TimerMode::RoundsBased`].
    pub round_count: Option<i32>,
    pub round_duration_seconds: Option<i32>,
    pub rest_duration_seconds: Option<i32>,
    pub scoring: ScoringConfig,
}
