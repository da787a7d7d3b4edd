//! Shared fixtures for unit tests

use crate::agent::{AgentEnvironment, AgentRng, CombatState};
use crate::augment::{AugmentContext, DamageEvent};
use crate::combat::{DamageReport, Damageable};
use crate::modifier::{BaseStats, DerivedStats, ModifierAggregate};
use crate::types::{AugmentId, DamageSource, EntityId, Round};
use glam::DVec2;
use rand::SeedableRng;

/// Owns everything an [`AugmentContext`] borrows, so a variant can be
/// driven without a full agent
pub(crate) struct Harness {
    pub id: AugmentId,
    pub owner: EntityId,
    pub active: bool,
    pub round: Round,
    pub now: f64,
    pub delta: f64,
    pub combat: CombatState,
    pub modifiers: ModifierAggregate,
    pub derived: DerivedStats,
    pub base: BaseStats,
    pub environment: AgentEnvironment,
    pub rng: AgentRng,
}

impl Harness {
    pub fn new(id: &str) -> Self {
        let base = BaseStats::default();
        let modifiers = ModifierAggregate::new();
        Harness {
            id: AugmentId::from(id),
            owner: EntityId(1),
            active: true,
            round: 1,
            now: 0.0,
            delta: 0.0,
            combat: CombatState::from_base(&base),
            derived: DerivedStats::compute(&base, &modifiers),
            modifiers,
            base,
            environment: AgentEnvironment::default(),
            rng: AgentRng::seed_from_u64(11),
        }
    }

    pub fn ctx(&mut self) -> AugmentContext<'_> {
        AugmentContext {
            owner: self.owner,
            augment_id: &self.id,
            active: self.active,
            current_round: self.round,
            now: self.now,
            delta: self.delta,
            combat: &mut self.combat,
            modifiers: &mut self.modifiers,
            derived: &mut self.derived,
            base: &self.base,
            environment: &self.environment,
            rng: &mut self.rng,
        }
    }
}

/// A shielded projectile hit from entity #2
pub(crate) fn sample_event(amount: f64) -> DamageEvent {
    DamageEvent {
        amount,
        impact_force: 0.0,
        hit_point: None,
        source: DamageSource::projectile(EntityId(2)),
        direct: false,
    }
}

/// Damageable that records every hit it receives
pub(crate) struct Dummy {
    pub id: EntityId,
    pub hits: Vec<f64>,
}

impl Dummy {
    pub fn new(id: u64) -> Self {
        Dummy {
            id: EntityId(id),
            hits: Vec::new(),
        }
    }
}

impl Damageable for Dummy {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn receive_damage(
        &mut self,
        amount: f64,
        _impact_force: f64,
        _hit_point: Option<DVec2>,
        _source: DamageSource,
    ) -> DamageReport {
        self.hits.push(amount);
        DamageReport::new(amount, false)
    }
}
