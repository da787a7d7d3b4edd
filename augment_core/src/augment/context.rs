//! Hook context - the narrow view of its agent an augment gets during a hook

use crate::agent::{AgentEnvironment, AgentRng, CombatState};
use crate::combat::Damageable;
use crate::modifier::{BaseStats, DerivedStats, ModifierAggregate, ModifierCategory};
use crate::types::{AugmentId, DamageSource, EntityId, Round};
use glam::DVec2;

/// Everything a hook may read or change on the owning agent
///
/// Multiplier writes are always keyed by the calling augment's id, and every
/// write that changes the aggregate recomputes derived stats immediately.
pub struct AugmentContext<'a> {
    pub(crate) owner: EntityId,
    pub(crate) augment_id: &'a AugmentId,
    pub(crate) active: bool,
    pub(crate) current_round: Round,
    pub(crate) now: f64,
    pub(crate) delta: f64,
    pub(crate) combat: &'a mut CombatState,
    pub(crate) modifiers: &'a mut ModifierAggregate,
    pub(crate) derived: &'a mut DerivedStats,
    pub(crate) base: &'a BaseStats,
    pub(crate) environment: &'a AgentEnvironment,
    pub(crate) rng: &'a mut AgentRng,
}

impl<'a> AugmentContext<'a> {
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn augment_id(&self) -> &AugmentId {
        self.augment_id
    }

    /// Whether the augment's round window covers the current round
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_round(&self) -> Round {
        self.current_round
    }

    /// Agent clock in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Seconds since the previous tick (0 outside of ticks)
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn combat(&self) -> &CombatState {
        self.combat
    }

    pub fn combat_mut(&mut self) -> &mut CombatState {
        &mut *self.combat
    }

    pub fn base_stats(&self) -> &BaseStats {
        self.base
    }

    pub fn derived_stats(&self) -> &DerivedStats {
        self.derived
    }

    pub fn rng(&mut self) -> &mut AgentRng {
        &mut *self.rng
    }

    /// Seconds the agent has been anchored, if it is
    pub fn anchored_for(&self) -> Option<f64> {
        self.environment
            .anchored_since
            .map(|since| (self.now - since).max(0.0))
    }

    /// This augment's multiplier in a category, if present
    pub fn multiplier(&self, category: ModifierCategory) -> Option<f64> {
        self.modifiers.get(category, self.augment_id)
    }

    pub fn effective_multiplier(&self, category: ModifierCategory) -> f64 {
        self.modifiers.effective(category)
    }

    /// Insert this augment's multiplier if absent and the augment is active
    pub fn add_multiplier_once(&mut self, category: ModifierCategory, value: f64) -> bool {
        if !self.active {
            return false;
        }
        let changed = self.modifiers.insert_if_absent(category, self.augment_id, value);
        self.refresh_derived(changed)
    }

    /// Insert or overwrite this augment's multiplier
    pub fn add_or_refresh_multiplier(&mut self, category: ModifierCategory, value: f64) -> bool {
        let changed = self.modifiers.insert_or_refresh(category, self.augment_id, value);
        self.refresh_derived(changed)
    }

    /// Remove this augment's multiplier if present
    pub fn remove_multiplier(&mut self, category: ModifierCategory) -> bool {
        let changed = self.modifiers.remove(category, self.augment_id);
        self.refresh_derived(changed)
    }

    fn refresh_derived(&mut self, changed: bool) -> bool {
        if changed {
            self.derived.recompute(self.base, self.modifiers);
        }
        changed
    }
}

/// Damage being intercepted before it is applied
///
/// Threaded through every pre-damage hook in loadout order. Flags only
/// escalate and damage only shrinks; [`DamageIntercept::merge`] enforces this
/// after each hook. The source and hit point are read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageIntercept {
    pub damage: f64,
    pub shield_ignored: bool,
    pub health_ignored: bool,
    source: DamageSource,
    hit_point: Option<DVec2>,
}

impl DamageIntercept {
    pub fn new(damage: f64) -> Self {
        Self::for_hit(damage, DamageSource::environment(), None)
    }

    pub fn for_hit(damage: f64, source: DamageSource, hit_point: Option<DVec2>) -> Self {
        DamageIntercept {
            damage,
            shield_ignored: false,
            health_ignored: false,
            source,
            hit_point,
        }
    }

    /// Who and what is dealing the damage
    pub fn source(&self) -> DamageSource {
        self.source
    }

    pub fn hit_point(&self) -> Option<DVec2> {
        self.hit_point
    }

    /// Combine the value before a hook with what the hook left behind
    pub fn merge(self, after: DamageIntercept) -> DamageIntercept {
        let damage = if after.damage.is_finite() {
            after.damage.min(self.damage).max(0.0)
        } else {
            self.damage
        };
        DamageIntercept {
            damage,
            shield_ignored: self.shield_ignored || after.shield_ignored,
            health_ignored: self.health_ignored || after.health_ignored,
            ..self
        }
    }
}

/// A hit that has already been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Incoming amount before interception and shield absorption
    pub amount: f64,
    pub impact_force: f64,
    pub hit_point: Option<DVec2>,
    pub source: DamageSource,
    /// Whether the hit bypassed the shield
    pub direct: bool,
}

/// Physical contact with another object
pub struct Contact<'a> {
    pub other: EntityId,
    /// Present when the other object can receive damage
    pub target: Option<&'a mut dyn Damageable>,
    pub closest_point: DVec2,
}

impl<'a> Contact<'a> {
    pub fn can_receive_damage(&self) -> bool {
        self.target.is_some()
    }
}
