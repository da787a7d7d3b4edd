//! Prelude module for convenient imports
//!
//! ```rust
//! use augment_core::prelude::*;
//! ```

// Core types
pub use crate::types::{AugmentId, DamageKind, DamageSource, EntityId, Round};

// Agents and the arena
pub use crate::agent::{Agent, CombatState, LifeState};
pub use crate::arena::Arena;

// Augments
pub use crate::augment::{AugmentBehavior, AugmentContext, AugmentDefinition, AugmentKind, AugmentRegistry};
pub use crate::loadout::{Loadout, LoadoutEntry};

// Modifiers
pub use crate::modifier::{BaseStats, ModifierCategory};

// Combat
pub use crate::combat::{CombatEvent, DamageReport, Damageable};

// Config
pub use crate::config::{default_augments, ArenaConstants};
