//! Agent - a shielded combat ship carrying a loadout of augments
//!
//! The agent owns its modifier aggregate and loadout exclusively. Augment
//! runtimes never hold a reference to the agent; every hook gets a short-lived
//! [`AugmentContext`] over the agent's fields instead.

mod state;

pub use state::{AgentEnvironment, CombatState, LifeState};

use crate::augment::{
    AugmentContext, AugmentDefinition, AugmentRuntime, BehaviorBuilder, Contact, DamageEvent, DamageIntercept,
};
use crate::combat::{CombatEvent, Damageable};
use crate::error::AugmentError;
use crate::loadout::{Loadout, LoadoutEntry};
use crate::modifier::{BaseStats, DerivedStats, ModifierAggregate, ModifierCategory};
use crate::types::{AugmentId, EntityId, Round};
use glam::DVec2;
use rand::SeedableRng;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Random source for chance-based augments
pub type AgentRng = rand_chacha::ChaCha8Rng;

#[derive(Debug)]
pub struct Agent {
    id: EntityId,
    base: BaseStats,
    pub(crate) combat: CombatState,
    modifiers: ModifierAggregate,
    derived: DerivedStats,
    loadout: Loadout,
    life: LifeState,
    position: DVec2,
    /// Seconds since spawn
    clock: f64,
    current_round: Round,
    rng: AgentRng,
    environment: AgentEnvironment,
    pub(crate) events: Vec<CombatEvent>,
}

impl Agent {
    /// Fresh agent with an empty loadout
    pub fn new(id: EntityId, base: BaseStats, seed: u64) -> Self {
        Self::spawn(id, base, Loadout::new(), 0, seed)
    }

    /// Spawn (or respawn) an agent, initializing a runtime for every entry
    /// from its persisted state
    pub fn spawn(id: EntityId, base: BaseStats, mut loadout: Loadout, current_round: Round, seed: u64) -> Self {
        loadout.attach_all(id, current_round);
        let modifiers = ModifierAggregate::new();
        let derived = DerivedStats::compute(&base, &modifiers);

        tracing::debug!(agent = %id, round = current_round, augments = loadout.len(), "agent spawned");

        Agent {
            id,
            combat: CombatState::from_base(&base),
            base,
            modifiers,
            derived,
            loadout,
            life: LifeState::Alive,
            position: DVec2::ZERO,
            clock: 0.0,
            current_round,
            rng: AgentRng::seed_from_u64(seed),
            environment: AgentEnvironment::default(),
            events: Vec::new(),
        }
    }

    /// Remove the agent, capturing every augment's state into the loadout
    pub fn despawn(mut self) -> Loadout {
        self.loadout.capture_and_detach();
        tracing::debug!(agent = %self.id, augments = self.loadout.len(), "agent despawned");
        self.loadout
    }

    // === Accessors ===

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base
    }

    pub fn combat(&self) -> &CombatState {
        &self.combat
    }

    pub fn derived_stats(&self) -> &DerivedStats {
        &self.derived
    }

    pub fn modifiers(&self) -> &ModifierAggregate {
        &self.modifiers
    }

    /// Product of all multipliers in a category
    pub fn effective_multiplier(&self, category: ModifierCategory) -> f64 {
        self.modifiers.effective(category)
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn life_state(&self) -> LifeState {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_destroyed(&self) -> bool {
        self.life == LifeState::Destroyed
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Updated by the physics integration
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn current_round(&self) -> Round {
        self.current_round
    }

    pub fn environment(&self) -> &AgentEnvironment {
        &self.environment
    }

    /// Mark the agent anchored (docked, stationary...) or not
    pub fn set_anchored(&mut self, anchored: bool) {
        match (anchored, self.environment.anchored_since) {
            (true, None) => self.environment.anchored_since = Some(self.clock),
            (false, Some(_)) => self.environment.anchored_since = None,
            _ => {}
        }
    }

    /// Presentation events since the last drain
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    // === Lifecycle ===

    /// Transition to destroyed. Returns false if already destroyed.
    pub fn destroy(&mut self) -> bool {
        self.destroy_towards(DVec2::ZERO)
    }

    pub(crate) fn destroy_towards(&mut self, direction: DVec2) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.life = LifeState::Destroyed;
        self.events.push(CombatEvent::Destroyed {
            agent: self.id,
            direction,
        });
        tracing::info!(agent = %self.id, round = self.current_round, "agent destroyed");
        true
    }

    // === Augments ===

    /// Acquire a built-in augment, replacing any entry with the same id
    pub fn acquire_augment(&mut self, definition: Arc<AugmentDefinition>, round_acquired: Round) {
        self.install(LoadoutEntry::new(definition, round_acquired));
    }

    /// Acquire an augment whose behavior comes from `builder`
    pub fn acquire_augment_with(
        &mut self,
        definition: Arc<AugmentDefinition>,
        round_acquired: Round,
        builder: BehaviorBuilder,
    ) {
        self.install(LoadoutEntry::with_builder(definition, round_acquired, builder));
    }

    fn install(&mut self, entry: LoadoutEntry) {
        let id = entry.id().clone();
        if let Some(mut replaced) = self.loadout.insert(entry) {
            tracing::debug!(agent = %self.id, augment = %id, "augment re-acquired, replacing entry");
            if let Some(runtime) = replaced.take_runtime() {
                self.retire(runtime);
            }
        }
        self.loadout.attach(&id, self.id, self.current_round);
        self.settle_depleted();
    }

    /// Drop an augment permanently, reverting its effects
    pub fn remove_augment(&mut self, id: &AugmentId) -> bool {
        let Some(mut entry) = self.loadout.remove(id) else {
            return false;
        };
        if let Some(runtime) = entry.take_runtime() {
            self.retire(runtime);
        }
        self.settle_depleted();
        true
    }

    /// Start a new round: update every runtime, then prune entries whose
    /// duration has fully elapsed
    pub fn set_current_round(&mut self, round: Round) {
        self.current_round = round;
        self.loadout.set_current_round(round);
        for mut entry in self.loadout.prune_expired(round) {
            tracing::debug!(agent = %self.id, augment = %entry.id(), round, "augment expired");
            if let Some(runtime) = entry.take_runtime() {
                self.retire(runtime);
            }
        }
        self.settle_depleted();
    }

    /// Advance the clock and run every augment's continuous effects
    pub fn tick(&mut self, delta: f64) {
        if self.is_destroyed() {
            return;
        }
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.clock += delta;
        self.dispatch("execute_effects", false, delta, |runtime, ctx| runtime.execute_effects(ctx));
        self.settle_depleted();
    }

    /// Physical contact with another object
    pub fn handle_contact(&mut self, other: EntityId, target: Option<&mut dyn Damageable>, closest_point: DVec2) {
        if self.is_destroyed() {
            return;
        }
        let mut contact = Contact {
            other,
            target,
            closest_point,
        };
        self.dispatch("on_contact", true, 0.0, |runtime, ctx| runtime.on_contact(&mut contact, ctx));
        self.settle_depleted();
    }

    /// Hooks outside the damage pipeline may drain health too
    fn settle_depleted(&mut self) {
        if self.is_alive() && self.combat.is_depleted() {
            self.destroy_towards(DVec2::ZERO);
        }
    }

    // === Hook dispatch ===

    /// Run the pre-damage hooks, threading one intercept through all of them
    pub(crate) fn intercept(&mut self, hit: &DamageEvent) -> DamageIntercept {
        let direct = hit.direct;
        let mut intercept = DamageIntercept::for_hit(hit.amount, hit.source, hit.hit_point);
        let hook = if direct {
            "on_before_take_direct_damage"
        } else {
            "on_before_take_damage"
        };
        self.dispatch(hook, true, 0.0, |runtime, ctx| {
            // A failing hook leaves the intercept untouched
            let mut proposed = intercept;
            if direct {
                runtime.on_before_take_direct_damage(&mut proposed, ctx)?;
            } else {
                runtime.on_before_take_damage(&mut proposed, ctx)?;
            }
            intercept = intercept.merge(proposed);
            Ok(())
        });
        intercept
    }

    /// Run the post-damage hooks
    pub(crate) fn after_damage(&mut self, event: &DamageEvent) {
        if event.direct {
            self.dispatch("on_take_direct_damage", true, 0.0, |runtime, ctx| {
                runtime.on_take_direct_damage(event, ctx)
            });
        } else {
            self.dispatch("on_take_damage", true, 0.0, |runtime, ctx| runtime.on_take_damage(event, ctx));
        }
    }

    /// Call a hook on every attached runtime in loadout order, isolating
    /// errors and panics
    fn dispatch<F>(&mut self, hook: &'static str, active_only: bool, delta: f64, mut call: F)
    where
        F: FnMut(&mut AugmentRuntime, &mut AugmentContext<'_>) -> Result<(), AugmentError>,
    {
        let Agent {
            id,
            base,
            combat,
            modifiers,
            derived,
            loadout,
            clock,
            rng,
            environment,
            ..
        } = self;

        for runtime in loadout.entries_mut().filter_map(LoadoutEntry::runtime_mut) {
            let active = runtime.is_active_by_rounds();
            if active_only && !active {
                continue;
            }
            let augment_id = runtime.id().clone();
            let mut ctx = AugmentContext {
                owner: *id,
                augment_id: &augment_id,
                active,
                current_round: runtime.current_round(),
                now: *clock,
                delta,
                combat: &mut *combat,
                modifiers: &mut *modifiers,
                derived: &mut *derived,
                base: &*base,
                environment: &*environment,
                rng: &mut *rng,
            };
            run_isolated(*id, &augment_id, hook, || call(runtime, &mut ctx));
        }
    }

    /// Tear down a runtime that is leaving the loadout
    fn retire(&mut self, mut runtime: AugmentRuntime) {
        let augment_id = runtime.id().clone();
        {
            let mut ctx = AugmentContext {
                owner: self.id,
                augment_id: &augment_id,
                active: runtime.is_active_by_rounds(),
                current_round: runtime.current_round(),
                now: self.clock,
                delta: 0.0,
                combat: &mut self.combat,
                modifiers: &mut self.modifiers,
                derived: &mut self.derived,
                base: &self.base,
                environment: &self.environment,
                rng: &mut self.rng,
            };
            run_isolated(self.id, &augment_id, "on_removed", || runtime.on_removed(&mut ctx));
        }
        if self.modifiers.remove_source(&augment_id) {
            self.derived.recompute(&self.base, &self.modifiers);
        }
        runtime.detach();
    }
}

fn run_isolated<F>(agent: EntityId, augment: &AugmentId, hook: &'static str, call: F)
where
    F: FnOnce() -> Result<(), AugmentError>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::warn!(agent = %agent, augment = %augment, hook, error = %err, "augment hook failed");
        }
        Err(payload) => {
            let reason = panic_message(&*payload);
            tracing::error!(agent = %agent, augment = %augment, hook, reason, "augment hook panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

impl Damageable for Agent {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn receive_damage(
        &mut self,
        amount: f64,
        impact_force: f64,
        hit_point: Option<DVec2>,
        source: crate::types::DamageSource,
    ) -> crate::combat::DamageReport {
        self.apply_damage(amount, impact_force, hit_point, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::{AugmentBehavior, AugmentKind};

    fn agent() -> Agent {
        Agent::new(EntityId(1), BaseStats::default(), 7)
    }

    fn boost(id: &str, multiplier: f64) -> Arc<AugmentDefinition> {
        Arc::new(AugmentDefinition::new(
            id,
            id,
            AugmentKind::StaticMultiplier {
                category: ModifierCategory::Speed,
                multiplier,
            },
        ))
    }

    #[test]
    fn test_tick_applies_multipliers_to_derived_stats() {
        let mut a = agent();
        a.acquire_augment(boost("thrusters", 1.5), 0);
        a.acquire_augment(boost("afterburner", 2.0), 0);
        a.tick(0.1);

        assert!((a.effective_multiplier(ModifierCategory::Speed) - 3.0).abs() < 1e-9);
        assert!((a.derived_stats().move_speed - a.base_stats().move_speed * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_reacquire_replaces_and_clears_multiplier() {
        let mut a = agent();
        a.acquire_augment(boost("thrusters", 1.5), 0);
        a.tick(0.1);
        a.acquire_augment(boost("thrusters", 1.25), 0);

        assert_eq!(a.loadout().len(), 1);
        // Old multiplier removed on replacement, new one added next tick
        assert!((a.effective_multiplier(ModifierCategory::Speed) - 1.0).abs() < f64::EPSILON);
        a.tick(0.1);
        assert!((a.effective_multiplier(ModifierCategory::Speed) - 1.25).abs() < f64::EPSILON);
        assert_eq!(a.modifiers().len(ModifierCategory::Speed), 1);
    }

    #[test]
    fn test_expiry_prunes_and_reverts() {
        let mut a = agent();
        let plating = Arc::new(
            AugmentDefinition::new("plating", "Plating", AugmentKind::MaxHealthBonus { bonus: 50.0 }).with_rounds(2),
        );
        a.acquire_augment(plating, 0);
        a.tick(0.1);
        assert!((a.combat().max_health() - 150.0).abs() < f64::EPSILON);

        a.set_current_round(1);
        a.tick(0.1);
        assert!((a.combat().max_health() - 150.0).abs() < f64::EPSILON);

        a.set_current_round(2);
        assert!(a.loadout().is_empty());
        assert!((a.combat().max_health() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_augment() {
        let mut a = agent();
        a.acquire_augment(boost("thrusters", 1.5), 0);
        a.tick(0.1);
        assert!(a.remove_augment(&AugmentId::from("thrusters")));
        assert!(!a.remove_augment(&AugmentId::from("thrusters")));
        assert!(a.modifiers().is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut a = agent();
        assert!(a.destroy());
        assert!(!a.destroy());
        let destroyed = a
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CombatEvent::Destroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn test_anchoring_tracks_clock() {
        let mut a = agent();
        a.tick(2.0);
        a.set_anchored(true);
        a.tick(1.0);
        a.set_anchored(true);
        assert_eq!(a.environment().anchored_since, Some(2.0));
        a.set_anchored(false);
        assert_eq!(a.environment().anchored_since, None);
    }

    #[derive(Debug)]
    struct Counter;

    impl AugmentBehavior for Counter {
        fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
            ctx.combat_mut().take_health(1.0);
            Ok(())
        }
    }

    fn counter(_: &AugmentDefinition) -> Box<dyn AugmentBehavior> {
        Box::new(Counter)
    }

    #[test]
    fn test_custom_behavior_survives_respawn() {
        let mut a = agent();
        let def = Arc::new(AugmentDefinition::new("leak", "Hull Leak", AugmentKind::None));
        a.acquire_augment_with(def, 0, counter);
        a.tick(0.1);
        assert!((a.combat().current_health() - 99.0).abs() < f64::EPSILON);

        let loadout = a.despawn();
        let mut b = Agent::spawn(EntityId(1), BaseStats::default(), loadout, 0, 7);
        b.tick(0.1);
        assert!((b.combat().current_health() - 99.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_destroyed_agent_ignores_ticks() {
        let mut a = agent();
        a.destroy();
        a.tick(1.0);
        assert!(a.clock().abs() < f64::EPSILON);
    }

    #[derive(Debug)]
    struct Drain;

    impl AugmentBehavior for Drain {
        fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
            ctx.combat_mut().set_health(0.0);
            Ok(())
        }
    }

    fn drain(_: &AugmentDefinition) -> Box<dyn AugmentBehavior> {
        Box::new(Drain)
    }

    #[test]
    fn test_health_drained_by_tick_destroys_once() {
        let mut a = agent();
        let def = Arc::new(AugmentDefinition::new("reactor_breach", "Reactor Breach", AugmentKind::None));
        a.acquire_augment_with(def, 0, drain);
        a.tick(0.1);
        a.tick(0.1);

        assert!(a.is_destroyed());
        let destroyed = a
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CombatEvent::Destroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);

        let report = a.apply_damage(10.0, 0.0, None, crate::types::DamageSource::environment());
        assert!(report.rejected);
        assert!(!report.is_killing_blow);
        assert!((a.combat().current_shield() - a.combat().max_shield()).abs() < f64::EPSILON);
    }

    #[derive(Debug)]
    struct Faulty;

    impl AugmentBehavior for Faulty {
        fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
            ctx.combat_mut().take_health(5.0);
            panic!("coolant loop ruptured");
        }
    }

    fn faulty(_: &AugmentDefinition) -> Box<dyn AugmentBehavior> {
        Box::new(Faulty)
    }

    #[test]
    fn test_panicking_hook_does_not_stop_later_hooks() {
        let mut a = agent();
        let broken = Arc::new(AugmentDefinition::new("coolant", "Coolant", AugmentKind::None));
        a.acquire_augment_with(broken, 0, faulty);
        a.acquire_augment(boost("thrusters", 1.5), 0);
        a.tick(0.1);

        assert!((a.combat().current_health() - 95.0).abs() < f64::EPSILON);
        assert!((a.effective_multiplier(ModifierCategory::Speed) - 1.5).abs() < f64::EPSILON);
        assert!(a.is_alive());
    }
}
