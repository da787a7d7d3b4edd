//! augment_core - Augment runtime and damage resolution for arena ships
//!
//! This library provides:
//! - ModifierAggregate: multiplicative per-category multipliers keyed by augment
//! - AugmentDefinition / AugmentRuntime: authored templates and their live, hooked instances
//! - Loadout: durable per-agent augment entries with captured state
//! - Agent: shield + health combat state with hook dispatch
//! - Damage resolution: shield-then-health pipeline with pre/post damage hooks
//! - Arena: round control, contact routing, removal and respawn

pub mod agent;
pub mod arena;
pub mod augment;
pub mod combat;
pub mod config;
pub mod error;
pub mod loadout;
pub mod modifier;
pub mod prelude;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export core types for convenience
pub use agent::{Agent, AgentEnvironment, CombatState, LifeState};
pub use arena::Arena;
pub use augment::{
    ActiveRounds, AugmentBehavior, AugmentContext, AugmentDefinition, AugmentKind, AugmentRegistry, AugmentRuntime,
    BehaviorBuilder, Contact, DamageEvent, DamageIntercept, PersistentState,
};
pub use combat::{CombatEvent, DamageReport, Damageable};
pub use config::{default_augments, ArenaConstants, ConfigError};
pub use error::AugmentError;
pub use loadout::{Loadout, LoadoutEntry};
pub use modifier::{BaseStats, DerivedStats, ModifierAggregate, ModifierCategory};
pub use types::{AugmentId, DamageKind, DamageSource, EntityId, Round};
