//! Augments - definitions, runtime instances and their hook interface

mod context;
mod definition;
mod registry;
mod runtime;
mod state;
pub mod variants;

pub use context::{AugmentContext, Contact, DamageEvent, DamageIntercept};
pub use definition::{ActiveRounds, AugmentDefinition, AugmentKind};
pub use registry::AugmentRegistry;
pub use runtime::{AugmentRuntime, BehaviorBuilder};
pub use state::PersistentState;

use crate::error::AugmentError;
use crate::types::{AugmentId, Round};
use std::fmt;

/// Hook interface implemented by every augment variant
///
/// Hooks run synchronously in loadout order. Each call is isolated: an error
/// or a panic is logged by the agent and the remaining hooks still run. A
/// panicking hook may leave its own partial writes behind.
///
/// Damage and contact hooks are only invoked while the augment is active by
/// rounds. `execute_effects` runs every tick regardless, so variants can tear
/// down their effect when the window closes.
pub trait AugmentBehavior: fmt::Debug + Send {
    /// Restore captured state. Return an error for state this variant does
    /// not understand; the runtime then falls back to a fresh instance.
    fn restore(&mut self, id: &AugmentId, state: &PersistentState) -> Result<(), AugmentError> {
        Err(AugmentError::invalid_state(
            id,
            format!("does not accept `{}` state", state.type_name()),
        ))
    }

    /// New round started
    fn on_round_set(&mut self, _current_round: Round) {}

    /// Every simulation tick
    fn execute_effects(&mut self, _ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        Ok(())
    }

    /// Before a shielded hit is applied
    fn on_before_take_damage(
        &mut self,
        _hit: &mut DamageIntercept,
        _ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        Ok(())
    }

    /// Before a shield-bypassing hit is applied
    fn on_before_take_direct_damage(
        &mut self,
        _hit: &mut DamageIntercept,
        _ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        Ok(())
    }

    /// After a shielded hit was applied
    fn on_take_damage(&mut self, _event: &DamageEvent, _ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        Ok(())
    }

    /// After a shield-bypassing hit was applied
    fn on_take_direct_damage(
        &mut self,
        _event: &DamageEvent,
        _ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        Ok(())
    }

    /// Physical contact with another object
    fn on_contact(&mut self, _contact: &mut Contact<'_>, _ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        Ok(())
    }

    /// The loadout entry is being pruned or replaced while attached.
    /// Multipliers keyed by this augment are cleared by the agent afterwards.
    fn on_removed(&mut self, _ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        Ok(())
    }

    /// Snapshot of durable private fields
    fn capture_state(&self) -> Option<PersistentState> {
        None
    }
}
