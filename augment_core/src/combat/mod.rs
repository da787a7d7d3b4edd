//! Combat - shield-then-health damage resolution for agents

mod events;
mod resolution;
mod result;

pub use events::CombatEvent;
pub use result::DamageReport;

use crate::types::{DamageSource, EntityId};
use glam::DVec2;

/// Anything that can be hit
///
/// Contact effects reach other objects only through this trait; they never
/// touch another agent's state directly.
pub trait Damageable {
    fn entity_id(&self) -> EntityId;

    /// Apply a shielded hit
    fn receive_damage(
        &mut self,
        amount: f64,
        impact_force: f64,
        hit_point: Option<DVec2>,
        source: DamageSource,
    ) -> DamageReport;
}
