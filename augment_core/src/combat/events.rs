//! Presentation events emitted by damage resolution
//!
//! Fire-and-forget: rendering and audio drain these from the agent. Nothing
//! in the combat rules depends on them being consumed.

use crate::types::EntityId;
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    /// Shield absorbed a hit and still holds
    ShieldHit {
        agent: EntityId,
        hit_point: Option<DVec2>,
        direction: DVec2,
        absorbed: f64,
    },
    /// Shield reached zero during this hit
    ShieldBroke {
        agent: EntityId,
        hit_point: Option<DVec2>,
        direction: DVec2,
        absorbed: f64,
    },
    HealthDamaged {
        agent: EntityId,
        hit_point: Option<DVec2>,
        direction: DVec2,
        amount: f64,
    },
    Destroyed {
        agent: EntityId,
        /// Direction of the killing blow (zero when unknown)
        direction: DVec2,
    },
}

impl CombatEvent {
    pub fn agent(&self) -> EntityId {
        match self {
            CombatEvent::ShieldHit { agent, .. }
            | CombatEvent::ShieldBroke { agent, .. }
            | CombatEvent::HealthDamaged { agent, .. }
            | CombatEvent::Destroyed { agent, .. } => *agent,
        }
    }
}
