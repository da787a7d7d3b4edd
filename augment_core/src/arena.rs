//! Arena - round controller and owner of every live agent
//!
//! Agents removed from play are benched: their base stats and durable
//! loadout (with captured augment state) stay here until they respawn.

use crate::agent::Agent;
use crate::augment::AugmentDefinition;
use crate::combat::{CombatEvent, DamageReport, Damageable};
use crate::config::ArenaConstants;
use crate::loadout::Loadout;
use crate::modifier::BaseStats;
use crate::types::{DamageSource, EntityId, Round};
use glam::DVec2;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug)]
struct Benched {
    base: BaseStats,
    loadout: Loadout,
}

#[derive(Debug, Default)]
pub struct Arena {
    round: Round,
    seed: u64,
    agents: Vec<Agent>,
    benched: BTreeMap<EntityId, Benched>,
    /// Respawn count per agent, mixed into the spawn seed
    lives: BTreeMap<EntityId, u64>,
}

impl Arena {
    pub fn new(seed: u64) -> Self {
        Arena {
            seed,
            ..Default::default()
        }
    }

    pub fn from_constants(constants: &ArenaConstants) -> Self {
        Self::new(constants.seed)
    }

    pub fn current_round(&self) -> Round {
        self.round
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    pub fn agent_mut(&mut self, id: EntityId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    /// Durable loadout of a removed agent
    pub fn benched_loadout(&self, id: EntityId) -> Option<&Loadout> {
        self.benched.get(&id).map(|b| &b.loadout)
    }

    pub fn is_benched(&self, id: EntityId) -> bool {
        self.benched.contains_key(&id)
    }

    // === Lifecycle ===

    /// Bring a new agent into play. Returns false if the id is already live
    /// or benched.
    pub fn spawn(&mut self, id: EntityId, base: BaseStats) -> bool {
        if self.agent(id).is_some() || self.is_benched(id) {
            tracing::debug!(agent = %id, "spawn ignored, id already in use");
            return false;
        }
        let seed = self.next_seed(id);
        self.agents.push(Agent::spawn(id, base, Loadout::new(), self.round, seed));
        true
    }

    /// Bring a benched agent back, restoring every augment from its captured state
    pub fn respawn(&mut self, id: EntityId) -> bool {
        let Some(Benched { base, loadout }) = self.benched.remove(&id) else {
            return false;
        };
        let seed = self.next_seed(id);
        self.agents.push(Agent::spawn(id, base, loadout, self.round, seed));
        true
    }

    /// Take an agent out of play, keeping its loadout for respawn
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let agent = self.agents.remove(index);
        let base = agent.base_stats().clone();
        let loadout = agent.despawn();
        self.benched.insert(id, Benched { base, loadout });
        true
    }

    /// Forget an agent entirely, live or benched
    pub fn remove_permanently(&mut self, id: EntityId) -> bool {
        let live = match self.index_of(id) {
            Some(index) => {
                self.agents.remove(index);
                true
            }
            None => false,
        };
        let benched = self.benched.remove(&id).is_some();
        self.lives.remove(&id);
        live || benched
    }

    /// Bench every destroyed agent. Returns their ids.
    pub fn collect_destroyed(&mut self) -> Vec<EntityId> {
        let destroyed: Vec<EntityId> = self
            .agents
            .iter()
            .filter(|a| a.is_destroyed())
            .map(Agent::id)
            .collect();
        for &id in &destroyed {
            self.remove(id);
        }
        destroyed
    }

    // === Rounds ===

    pub fn advance_round(&mut self) -> Round {
        self.set_current_round(self.round.saturating_add(1));
        self.round
    }

    /// Set the round on every agent and prune expired augments, live and benched
    pub fn set_current_round(&mut self, round: Round) {
        self.round = round;
        for agent in &mut self.agents {
            agent.set_current_round(round);
        }
        for benched in self.benched.values_mut() {
            benched.loadout.prune_expired(round);
        }
        tracing::debug!(round, agents = self.agents.len(), "round started");
    }

    /// Give an agent (live or benched) an augment at the current round
    pub fn acquire_augment(&mut self, id: EntityId, definition: Arc<AugmentDefinition>) -> bool {
        let round = self.round;
        if let Some(agent) = self.agent_mut(id) {
            agent.acquire_augment(definition, round);
            return true;
        }
        match self.benched.get_mut(&id) {
            Some(benched) => {
                benched.loadout.acquire(definition, round);
                true
            }
            None => false,
        }
    }

    // === Simulation ===

    pub fn tick(&mut self, delta: f64) {
        for agent in &mut self.agents {
            agent.tick(delta);
        }
    }

    pub fn apply_damage(
        &mut self,
        target: EntityId,
        amount: f64,
        impact_force: f64,
        hit_point: Option<DVec2>,
        source: DamageSource,
    ) -> Option<DamageReport> {
        self.agent_mut(target)
            .map(|agent| agent.apply_damage(amount, impact_force, hit_point, source))
    }

    pub fn apply_direct_damage(
        &mut self,
        target: EntityId,
        amount: f64,
        impact_force: f64,
        hit_point: Option<DVec2>,
        source: DamageSource,
    ) -> Option<DamageReport> {
        self.agent_mut(target)
            .map(|agent| agent.apply_direct_damage(amount, impact_force, hit_point, source))
    }

    /// Two live agents touched; each side's contact hooks see the other as a target
    pub fn contact(&mut self, a: EntityId, b: EntityId, point: DVec2) -> bool {
        let (Some(i), Some(j)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        if i == j {
            return false;
        }
        let (first, second) = pair_mut(&mut self.agents, i, j);
        first.handle_contact(b, Some(&mut *second as &mut dyn Damageable), point);
        second.handle_contact(a, Some(&mut *first as &mut dyn Damageable), point);
        true
    }

    /// Events from every live agent since the last drain
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.agents.iter_mut().flat_map(Agent::drain_events).collect()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.agents.iter().position(|a| a.id() == id)
    }

    fn next_seed(&mut self, id: EntityId) -> u64 {
        let life = self.lives.entry(id).or_insert(0);
        let seed = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(id.0.rotate_left(32))
            .wrapping_add(*life);
        *life += 1;
        seed
    }
}

/// Two distinct mutable elements, in argument order
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
