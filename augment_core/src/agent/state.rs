//! Agent combat state - two-layer shield + health pool

use crate::modifier::BaseStats;
use serde::{Deserialize, Serialize};

/// Alive → Destroyed, one way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeState {
    Alive,
    Destroyed,
}

/// Shield and health pools
///
/// Every mutator keeps `0 <= current_health <= max_health` and
/// `0 <= current_shield <= max_shield`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    current_health: f64,
    max_health: f64,
    current_shield: f64,
    max_shield: f64,
    /// Whether the shield can currently absorb damage
    has_shield: bool,
}

impl CombatState {
    pub fn new(max_health: f64, max_shield: f64, has_shield: bool) -> Self {
        let max_health = sanitize(max_health);
        let max_shield = sanitize(max_shield);
        CombatState {
            current_health: max_health,
            max_health,
            current_shield: if has_shield { max_shield } else { 0.0 },
            max_shield,
            has_shield,
        }
    }

    /// Full pools from base stats
    pub fn from_base(base: &BaseStats) -> Self {
        Self::new(base.max_health, base.max_shield, base.has_shield)
    }

    pub fn current_health(&self) -> f64 {
        self.current_health
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn current_shield(&self) -> f64 {
        self.current_shield
    }

    pub fn max_shield(&self) -> f64 {
        self.max_shield
    }

    pub fn has_shield(&self) -> bool {
        self.has_shield
    }

    /// current / max health (0 when max is 0)
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.current_health / self.max_health
        }
    }

    /// Set health, clamped into range
    pub fn set_health(&mut self, value: f64) {
        self.current_health = sanitize(value).min(self.max_health);
    }

    /// Heal by amount, capped at max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.current_health;
        self.set_health(before + sanitize(amount));
        self.current_health - before
    }

    /// Remove up to `amount` health. Returns the amount actually removed.
    pub fn take_health(&mut self, amount: f64) -> f64 {
        let taken = sanitize(amount).min(self.current_health);
        self.current_health -= taken;
        taken
    }

    /// Change max health, keeping the current health fraction
    pub fn set_max_health_proportional(&mut self, new_max: f64) {
        let fraction = if self.max_health > 0.0 {
            self.current_health / self.max_health
        } else {
            1.0
        };
        self.max_health = sanitize(new_max);
        self.current_health = (fraction * self.max_health).clamp(0.0, self.max_health);
    }

    /// Set shield, clamped into range
    pub fn set_shield(&mut self, value: f64) {
        self.current_shield = sanitize(value).min(self.max_shield);
    }

    pub fn refill_shield(&mut self) {
        self.current_shield = self.max_shield;
    }

    /// Absorb up to `amount` with the shield. Returns the amount absorbed.
    pub fn absorb_with_shield(&mut self, amount: f64) -> f64 {
        let absorbed = sanitize(amount).min(self.current_shield);
        self.current_shield -= absorbed;
        absorbed
    }

    pub fn set_has_shield(&mut self, has_shield: bool) {
        self.has_shield = has_shield;
    }

    pub fn is_depleted(&self) -> bool {
        self.current_health <= 0.0
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Host-controlled world conditions some augments react to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentEnvironment {
    /// Clock time the agent became anchored, if it currently is
    pub anchored_since: Option<f64>,
}
