//! Arena constants configuration

use crate::modifier::BaseStats;
use serde::{Deserialize, Serialize};

/// Tunable arena constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConstants {
    /// Stats every agent spawns with
    #[serde(default)]
    pub base_stats: BaseStats,
    /// Simulation ticks per second
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    /// Seconds per round
    #[serde(default = "default_round_duration")]
    pub round_duration: f64,
    /// Base seed for per-agent random sources
    #[serde(default)]
    pub seed: u64,
}

impl Default for ArenaConstants {
    fn default() -> Self {
        ArenaConstants {
            base_stats: BaseStats::default(),
            tick_rate: default_tick_rate(),
            round_duration: default_round_duration(),
            seed: 0,
        }
    }
}

impl ArenaConstants {
    /// Load the bundled constants
    pub fn bundled() -> Self {
        let toml = include_str!("../../config/arena.toml");
        super::parse_toml(toml).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "bundled arena constants failed to load");
            ArenaConstants::default()
        })
    }

    /// Seconds per tick
    pub fn tick_delta(&self) -> f64 {
        if self.tick_rate > 0.0 {
            1.0 / self.tick_rate
        } else {
            0.0
        }
    }

    /// Whole ticks in one round
    pub fn ticks_per_round(&self) -> u32 {
        (self.round_duration * self.tick_rate).max(0.0).round() as u32
    }
}

fn default_tick_rate() -> f64 {
    60.0
}
fn default_round_duration() -> f64 {
    30.0
}
