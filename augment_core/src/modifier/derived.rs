//! Derived stats - base ship stats scaled by the modifier aggregate

use super::{ModifierAggregate, ModifierCategory};
use serde::{Deserialize, Serialize};

/// Unmodified ship stats, as authored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default = "default_max_health")]
    pub max_health: f64,
    #[serde(default = "default_max_shield")]
    pub max_shield: f64,
    /// Whether the hull carries a shield generator at all
    #[serde(default = "default_has_shield")]
    pub has_shield: bool,
    #[serde(default = "default_move_speed")]
    pub move_speed: f64,
    /// Degrees per second
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f64,
    /// Damage per shot
    #[serde(default = "default_damage")]
    pub damage: f64,
    /// Shots per second
    #[serde(default = "default_fire_rate")]
    pub fire_rate: f64,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            max_health: default_max_health(),
            max_shield: default_max_shield(),
            has_shield: default_has_shield(),
            move_speed: default_move_speed(),
            rotation_speed: default_rotation_speed(),
            damage: default_damage(),
            fire_rate: default_fire_rate(),
        }
    }
}

fn default_max_health() -> f64 {
    100.0
}
fn default_max_shield() -> f64 {
    50.0
}
fn default_has_shield() -> bool {
    true
}
fn default_move_speed() -> f64 {
    8.0
}
fn default_rotation_speed() -> f64 {
    180.0
}
fn default_damage() -> f64 {
    10.0
}
fn default_fire_rate() -> f64 {
    4.0
}

/// Stats read by the movement and weapon systems
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub move_speed: f64,
    pub rotation_speed: f64,
    pub damage: f64,
    pub fire_rate: f64,
}

impl DerivedStats {
    /// Compute from base stats and the current aggregate
    pub fn compute(base: &BaseStats, modifiers: &ModifierAggregate) -> Self {
        DerivedStats {
            move_speed: base.move_speed * modifiers.effective(ModifierCategory::Speed),
            rotation_speed: base.rotation_speed * modifiers.effective(ModifierCategory::Rotation),
            damage: base.damage * modifiers.effective(ModifierCategory::Damage),
            fire_rate: base.fire_rate * modifiers.effective(ModifierCategory::FireRate),
        }
    }

    /// Recompute in place after the aggregate changed
    pub fn recompute(&mut self, base: &BaseStats, modifiers: &ModifierAggregate) {
        *self = Self::compute(base, modifiers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AugmentId;

    #[test]
    fn test_unmodified_matches_base() {
        let base = BaseStats::default();
        let derived = DerivedStats::compute(&base, &ModifierAggregate::new());
        assert!((derived.move_speed - base.move_speed).abs() < f64::EPSILON);
        assert!((derived.damage - base.damage).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recompute_follows_aggregate() {
        let base = BaseStats::default();
        let mut agg = ModifierAggregate::new();
        let mut derived = DerivedStats::compute(&base, &agg);

        agg.insert_if_absent(ModifierCategory::Speed, &AugmentId::from("thrusters"), 1.5);
        derived.recompute(&base, &agg);

        assert!((derived.move_speed - base.move_speed * 1.5).abs() < 1e-9);
        assert!((derived.rotation_speed - base.rotation_speed).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_stats_serde_defaults() {
        let base: BaseStats = toml::from_str("max_health = 250.0").unwrap();
        assert!((base.max_health - 250.0).abs() < f64::EPSILON);
        assert!((base.max_shield - 50.0).abs() < f64::EPSILON);
        assert!(base.has_shield);
    }
}
