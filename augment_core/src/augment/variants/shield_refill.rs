//! Shield refill - instantly recharge an empty shield, once per round

use crate::augment::{AugmentBehavior, AugmentContext, PersistentState};
use crate::error::AugmentError;
use crate::types::{AugmentId, Round};

#[derive(Debug, Clone, Default)]
pub struct ShieldRefill {
    last_used_round: Option<Round>,
}

impl ShieldRefill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_used_round(&self) -> Option<Round> {
        self.last_used_round
    }
}

impl AugmentBehavior for ShieldRefill {
    fn restore(&mut self, id: &AugmentId, state: &PersistentState) -> Result<(), AugmentError> {
        match state {
            PersistentState::ShieldRefill { last_used_round } => {
                self.last_used_round = *last_used_round;
                Ok(())
            }
            other => Err(AugmentError::invalid_state(
                id,
                format!("expected shield_refill state, got `{}`", other.type_name()),
            )),
        }
    }

    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if !ctx.is_active() || self.last_used_round == Some(ctx.current_round()) {
            return Ok(());
        }

        let combat = ctx.combat();
        if !combat.has_shield() || combat.max_shield() <= 0.0 || combat.current_shield() > 0.0 {
            return Ok(());
        }

        ctx.combat_mut().refill_shield();
        self.last_used_round = Some(ctx.current_round());
        tracing::debug!(augment = %ctx.augment_id(), agent = %ctx.owner(), round = ctx.current_round(), "shield refilled");
        Ok(())
    }

    fn capture_state(&self) -> Option<PersistentState> {
        Some(PersistentState::ShieldRefill {
            last_used_round: self.last_used_round,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;

    #[test]
    fn test_refills_empty_shield_once_per_round() {
        let mut h = Harness::new("capacitor");
        let mut refill = ShieldRefill::new();

        h.combat.set_shield(0.0);
        refill.execute_effects(&mut h.ctx()).unwrap();
        assert!((h.combat.current_shield() - h.combat.max_shield()).abs() < f64::EPSILON);

        // Second depletion in the same round stays empty
        h.combat.set_shield(0.0);
        refill.execute_effects(&mut h.ctx()).unwrap();
        assert!(h.combat.current_shield().abs() < f64::EPSILON);

        // Next round it works again
        h.round += 1;
        refill.execute_effects(&mut h.ctx()).unwrap();
        assert!(h.combat.current_shield() > 0.0);
        assert_eq!(refill.last_used_round(), Some(h.round));
    }

    #[test]
    fn test_partial_shield_is_left_alone() {
        let mut h = Harness::new("capacitor");
        let mut refill = ShieldRefill::new();
        h.combat.set_shield(1.0);
        refill.execute_effects(&mut h.ctx()).unwrap();
        assert!((h.combat.current_shield() - 1.0).abs() < f64::EPSILON);
        assert_eq!(refill.last_used_round(), None);
    }

    #[test]
    fn test_inactive_does_nothing() {
        let mut h = Harness::new("capacitor");
        h.active = false;
        let mut refill = ShieldRefill::new();
        h.combat.set_shield(0.0);
        refill.execute_effects(&mut h.ctx()).unwrap();
        assert!(h.combat.current_shield().abs() < f64::EPSILON);
    }
}
