//! Core identifiers and small value types shared across the crate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of anything in the arena that can take part in combat
/// (agents, asteroids, turrets...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

/// Stable string identity of an augment definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AugmentId(pub String);

impl AugmentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AugmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AugmentId {
    fn from(s: &str) -> Self {
        AugmentId(s.to_string())
    }
}

impl From<String> for AugmentId {
    fn from(s: String) -> Self {
        AugmentId(s)
    }
}

/// Match round number
pub type Round = u32;

/// How damage was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Projectile,
    Beam,
    Contact,
    Environment,
}

/// Who and what caused a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSource {
    /// Attacking entity, if any
    pub attacker: Option<EntityId>,
    pub kind: DamageKind,
}

impl DamageSource {
    pub fn new(attacker: Option<EntityId>, kind: DamageKind) -> Self {
        DamageSource { attacker, kind }
    }

    pub fn projectile(attacker: EntityId) -> Self {
        Self::new(Some(attacker), DamageKind::Projectile)
    }

    pub fn beam(attacker: EntityId) -> Self {
        Self::new(Some(attacker), DamageKind::Beam)
    }

    pub fn contact(attacker: EntityId) -> Self {
        Self::new(Some(attacker), DamageKind::Contact)
    }

    pub fn environment() -> Self {
        Self::new(None, DamageKind::Environment)
    }
}
