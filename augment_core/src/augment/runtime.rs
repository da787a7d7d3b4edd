//! AugmentRuntime - one live augment bound to one agent

use super::{
    variants, AugmentBehavior, AugmentContext, AugmentDefinition, Contact, DamageEvent, DamageIntercept,
    PersistentState,
};
use crate::error::AugmentError;
use crate::types::{AugmentId, EntityId, Round};
use std::sync::Arc;

/// Creates the behavior for a definition
pub type BehaviorBuilder = fn(&AugmentDefinition) -> Box<dyn AugmentBehavior>;

/// Stateful augment instance
///
/// Owns the round bookkeeping and the owner binding; the variant-specific
/// logic lives in the boxed behavior. Once detached every hook is a no-op.
#[derive(Debug)]
pub struct AugmentRuntime {
    definition: Arc<AugmentDefinition>,
    round_acquired: Round,
    current_round: Round,
    owner: Option<EntityId>,
    behavior: Box<dyn AugmentBehavior>,
}

impl AugmentRuntime {
    /// Bind a built-in variant to an agent, restoring prior state if given
    pub fn initialize(
        definition: Arc<AugmentDefinition>,
        owner: EntityId,
        round_acquired: Round,
        state: Option<&PersistentState>,
    ) -> Self {
        Self::initialize_with(definition, owner, round_acquired, state, variants::build)
    }

    /// Bind a behavior produced by `builder`
    ///
    /// Never fails: state the behavior rejects is dropped and a fresh
    /// behavior is built in its place.
    pub fn initialize_with(
        definition: Arc<AugmentDefinition>,
        owner: EntityId,
        round_acquired: Round,
        state: Option<&PersistentState>,
        builder: BehaviorBuilder,
    ) -> Self {
        let mut behavior = builder(&definition);
        if let Some(state) = state {
            if let Err(err) = behavior.restore(&definition.id, state) {
                tracing::debug!(
                    augment = %definition.id,
                    agent = %owner,
                    error = %err,
                    "persisted state rejected, starting fresh"
                );
                behavior = builder(&definition);
            }
        }

        AugmentRuntime {
            definition,
            round_acquired,
            current_round: round_acquired,
            owner: Some(owner),
            behavior,
        }
    }

    pub fn definition(&self) -> &Arc<AugmentDefinition> {
        &self.definition
    }

    pub fn id(&self) -> &AugmentId {
        &self.definition.id
    }

    pub fn round_acquired(&self) -> Round {
        self.round_acquired
    }

    pub fn current_round(&self) -> Round {
        self.current_round
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Whether the duration window covers the current round
    pub fn is_active_by_rounds(&self) -> bool {
        self.definition
            .max_active_rounds
            .covers(self.round_acquired, self.current_round)
    }

    pub fn set_current_round(&mut self, round: Round) {
        self.current_round = round;
        self.behavior.on_round_set(round);
    }

    /// Unbind from the agent; later hook calls do nothing
    pub fn detach(&mut self) {
        self.owner = None;
    }

    pub fn capture_persistent_state(&self) -> Option<PersistentState> {
        self.behavior.capture_state()
    }

    pub fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.execute_effects(ctx)
    }

    pub fn on_before_take_damage(
        &mut self,
        hit: &mut DamageIntercept,
        ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.on_before_take_damage(hit, ctx)
    }

    pub fn on_before_take_direct_damage(
        &mut self,
        hit: &mut DamageIntercept,
        ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.on_before_take_direct_damage(hit, ctx)
    }

    pub fn on_take_damage(&mut self, event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.on_take_damage(event, ctx)
    }

    pub fn on_take_direct_damage(
        &mut self,
        event: &DamageEvent,
        ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.on_take_direct_damage(event, ctx)
    }

    pub fn on_contact(&mut self, contact: &mut Contact<'_>, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.on_contact(contact, ctx)
    }

    pub fn on_removed(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if !self.is_attached() {
            return Ok(());
        }
        self.behavior.on_removed(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::AugmentKind;

    fn heal_def() -> Arc<AugmentDefinition> {
        Arc::new(
            AugmentDefinition::new("second_wind", "Second Wind", AugmentKind::EmergencyHeal { heal_fraction: 0.5 })
                .with_rounds(3),
        )
    }

    #[test]
    fn test_activity_follows_round() {
        let mut rt = AugmentRuntime::initialize(heal_def(), EntityId(1), 4, None);
        assert!(rt.is_active_by_rounds());

        rt.set_current_round(6); // elapsed 2 == N-1
        assert!(rt.is_active_by_rounds());

        rt.set_current_round(7); // elapsed 3 == N
        assert!(!rt.is_active_by_rounds());
    }

    #[test]
    fn test_restore_matching_state() {
        let state = PersistentState::EmergencyHeal { triggered: true };
        let rt = AugmentRuntime::initialize(heal_def(), EntityId(1), 0, Some(&state));
        assert_eq!(rt.capture_persistent_state(), Some(state));
    }

    #[test]
    fn test_mismatched_state_falls_back_to_default() {
        let wrong = PersistentState::ShieldRefill { last_used_round: Some(2) };
        let rt = AugmentRuntime::initialize(heal_def(), EntityId(1), 0, Some(&wrong));
        assert_eq!(
            rt.capture_persistent_state(),
            Some(PersistentState::EmergencyHeal { triggered: false })
        );
    }

    #[test]
    fn test_detach_unbinds() {
        let mut rt = AugmentRuntime::initialize(heal_def(), EntityId(9), 0, None);
        assert_eq!(rt.owner(), Some(EntityId(9)));
        rt.detach();
        assert!(!rt.is_attached());
    }
}
