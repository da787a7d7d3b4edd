//! Scripted match simulation

use augment_core::prelude::*;
use glam::DVec2;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Chance a fired shot connects
const HIT_CHANCE: f64 = 0.6;
/// Chance per tick that two random ships collide
const CONTACT_CHANCE: f64 = 0.02;
/// Arena radius the ships are spread around
const ARENA_RADIUS: f64 = 50.0;

/// Per-ship tallies
#[derive(Debug, Clone, Default)]
pub struct ShipRecord {
    pub shots: u32,
    pub hits: u32,
    pub damage_dealt: f64,
    pub kills: u32,
    pub deaths: u32,
    pub augments: Vec<String>,
}

/// Outcome of a whole match
#[derive(Debug, Clone, Default)]
pub struct MatchSummary {
    pub rounds: u32,
    pub ticks: u64,
    pub events: usize,
    pub ships: BTreeMap<EntityId, ShipRecord>,
}

/// Run a scripted match: every round each ship picks an augment, then the
/// round's ticks play out with ships firing at random opponents
pub struct MatchSimulation<'a, R: Rng> {
    arena: Arena,
    registry: &'a AugmentRegistry,
    constants: &'a ArenaConstants,
    rng: R,
    /// Fractional shots owed to each ship
    charge: BTreeMap<EntityId, f64>,
    summary: MatchSummary,
}

impl<'a, R: Rng> MatchSimulation<'a, R> {
    pub fn new(registry: &'a AugmentRegistry, constants: &'a ArenaConstants, ships: u64, rng: R) -> Self {
        let mut arena = Arena::from_constants(constants);
        let mut summary = MatchSummary::default();
        for n in 0..ships {
            let id = EntityId(n + 1);
            arena.spawn(id, constants.base_stats.clone());
            summary.ships.insert(id, ShipRecord::default());
        }

        let mut sim = MatchSimulation {
            arena,
            registry,
            constants,
            rng,
            charge: BTreeMap::new(),
            summary,
        };
        sim.place_ships();
        sim
    }

    pub fn run(mut self, rounds: u32, ticks_per_round: u32) -> MatchSummary {
        for _ in 0..rounds {
            self.start_round();
            for _ in 0..ticks_per_round {
                self.step();
            }
            self.summary.rounds += 1;
        }
        self.summary
    }

    fn start_round(&mut self) {
        let round = self.arena.advance_round();

        // Everyone benched comes back for the new round
        let benched: Vec<EntityId> = self
            .summary
            .ships
            .keys()
            .copied()
            .filter(|id| self.arena.is_benched(*id))
            .collect();
        for id in benched {
            self.arena.respawn(id);
        }
        self.place_ships();

        let ids = self.registry.ids();
        let ships: Vec<EntityId> = self.summary.ships.keys().copied().collect();
        for ship in ships {
            let Some(pick) = ids.choose(&mut self.rng) else {
                break;
            };
            if let Some(definition) = self.registry.get(pick.as_str()) {
                tracing::debug!(ship = %ship, augment = %pick, round, "augment acquired");
                self.arena.acquire_augment(ship, definition);
                if let Some(record) = self.summary.ships.get_mut(&ship) {
                    record.augments.push(pick.to_string());
                }
            }

            // Some ships dock for repairs this round
            let docked = self.rng.gen_bool(0.25);
            if let Some(agent) = self.arena.agent_mut(ship) {
                agent.set_anchored(docked);
            }
        }
    }

    fn step(&mut self) {
        let delta = self.constants.tick_delta();
        self.arena.tick(delta);
        self.summary.ticks += 1;

        let live: Vec<EntityId> = self.arena.agents().filter(|a| a.is_alive()).map(Agent::id).collect();
        for &shooter in &live {
            self.fire(shooter, &live, delta);
        }

        if live.len() >= 2 && self.rng.gen_bool(CONTACT_CHANCE) {
            let pair: Vec<EntityId> = live.choose_multiple(&mut self.rng, 2).copied().collect();
            if let [a, b] = pair[..] {
                let point = self.arena.agent(a).map(Agent::position).unwrap_or(DVec2::ZERO);
                self.arena.contact(a, b, point);
            }
        }

        for destroyed in self.arena.collect_destroyed() {
            if let Some(record) = self.summary.ships.get_mut(&destroyed) {
                record.deaths += 1;
            }
        }
        self.summary.events += self.arena.drain_events().len();
    }

    fn fire(&mut self, shooter: EntityId, live: &[EntityId], delta: f64) {
        let Some(agent) = self.arena.agent(shooter) else {
            return;
        };
        if !agent.is_alive() {
            return;
        }
        let stats = agent.derived_stats().clone();
        let origin = agent.position();

        let charge = self.charge.entry(shooter).or_insert(0.0);
        *charge += stats.fire_rate * delta;
        let shots = charge.floor();
        *charge -= shots;

        for _ in 0..shots as u32 {
            let targets: Vec<EntityId> = live.iter().copied().filter(|&t| t != shooter).collect();
            let Some(&target) = targets.choose(&mut self.rng) else {
                return;
            };
            let record = self.summary.ships.entry(shooter).or_default();
            record.shots += 1;
            if !self.rng.gen_bool(HIT_CHANCE) {
                continue;
            }

            let hit_point = self.arena.agent(target).map(|t| t.position() + (origin - t.position()).normalize_or_zero());
            let report = self.arena.apply_damage(
                target,
                stats.damage,
                1.0,
                hit_point,
                DamageSource::projectile(shooter),
            );
            let Some(report) = report else {
                continue;
            };
            let record = self.summary.ships.entry(shooter).or_default();
            record.hits += 1;
            record.damage_dealt += report.total_applied();
            if report.is_killing_blow {
                record.kills += 1;
                tracing::info!(shooter = %shooter, target = %target, "kill");
            }
        }
    }

    fn place_ships(&mut self) {
        let count = self.summary.ships.len().max(1) as f64;
        let ids: Vec<EntityId> = self.summary.ships.keys().copied().collect();
        for (i, id) in ids.into_iter().enumerate() {
            let angle = std::f64::consts::TAU * i as f64 / count;
            if let Some(agent) = self.arena.agent_mut(id) {
                agent.set_position(DVec2::from_angle(angle) * ARENA_RADIUS);
            }
        }
    }
}
