//! Emergency heal - survive one lethal hit per loadout entry
//!
//! The rescue restores health directly in the post-damage hook. There is no
//! intermediate step that inflates the shield for a tick first.

use crate::augment::{AugmentBehavior, AugmentContext, DamageEvent, PersistentState};
use crate::error::AugmentError;
use crate::types::AugmentId;

#[derive(Debug, Clone)]
pub struct EmergencyHeal {
    heal_fraction: f64,
    /// Persisted: the heal fires at most once per loadout entry
    triggered: bool,
}

impl EmergencyHeal {
    pub fn new(heal_fraction: f64) -> Self {
        EmergencyHeal {
            heal_fraction,
            triggered: false,
        }
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    fn rescue(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if self.triggered || !ctx.combat().is_depleted() {
            return Ok(());
        }

        let max = ctx.combat().max_health();
        if max <= 0.0 {
            return Err(AugmentError::hook_failed(ctx.augment_id(), "agent has no max health to restore"));
        }

        ctx.combat_mut().set_health(max * self.heal_fraction);
        self.triggered = true;
        tracing::debug!(
            augment = %ctx.augment_id(),
            agent = %ctx.owner(),
            health = ctx.combat().current_health(),
            "lethal hit cancelled"
        );
        Ok(())
    }
}

impl AugmentBehavior for EmergencyHeal {
    fn restore(&mut self, id: &AugmentId, state: &PersistentState) -> Result<(), AugmentError> {
        match state {
            PersistentState::EmergencyHeal { triggered } => {
                self.triggered = *triggered;
                Ok(())
            }
            other => Err(AugmentError::invalid_state(
                id,
                format!("expected emergency_heal state, got `{}`", other.type_name()),
            )),
        }
    }

    fn on_take_damage(&mut self, _event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        self.rescue(ctx)
    }

    fn on_take_direct_damage(&mut self, _event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        self.rescue(ctx)
    }

    fn capture_state(&self) -> Option<PersistentState> {
        Some(PersistentState::EmergencyHeal {
            triggered: self.triggered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_event, Harness};

    #[test]
    fn test_heals_on_lethal_hit() {
        let mut h = Harness::new("second_wind");
        h.combat.set_health(0.0);
        let mut heal = EmergencyHeal::new(0.75);

        heal.on_take_damage(&sample_event(20.0), &mut h.ctx()).unwrap();

        assert!((h.combat.current_health() - 75.0).abs() < 1e-9);
        assert!(heal.triggered());
    }

    #[test]
    fn test_ignores_non_lethal_hit() {
        let mut h = Harness::new("second_wind");
        h.combat.set_health(10.0);
        let mut heal = EmergencyHeal::new(0.75);

        heal.on_take_damage(&sample_event(5.0), &mut h.ctx()).unwrap();

        assert!((h.combat.current_health() - 10.0).abs() < f64::EPSILON);
        assert!(!heal.triggered());
    }

    #[test]
    fn test_fires_only_once() {
        let mut h = Harness::new("second_wind");
        let mut heal = EmergencyHeal::new(0.5);

        h.combat.set_health(0.0);
        heal.on_take_damage(&sample_event(20.0), &mut h.ctx()).unwrap();
        h.combat.set_health(0.0);
        heal.on_take_damage(&sample_event(20.0), &mut h.ctx()).unwrap();

        assert!(h.combat.is_depleted());
    }

    #[test]
    fn test_restore_rejects_foreign_state() {
        let mut heal = EmergencyHeal::new(0.5);
        let id = AugmentId::from("second_wind");
        let foreign = PersistentState::ShieldRefill { last_used_round: None };
        assert!(heal.restore(&id, &foreign).is_err());
        assert!(heal
            .restore(&id, &PersistentState::EmergencyHeal { triggered: true })
            .is_ok());
        assert!(heal.triggered());
    }
}
