//! Contact retaliation - damage whatever rams the ship

use crate::augment::{AugmentBehavior, AugmentContext, Contact, PersistentState};
use crate::error::AugmentError;
use crate::types::{AugmentId, DamageSource, EntityId};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ContactRetaliation {
    damage: f64,
    cooldown: f64,
    /// Seconds left before each target can be hit again
    cooldowns: BTreeMap<EntityId, f64>,
}

impl ContactRetaliation {
    pub fn new(damage: f64, cooldown: f64) -> Self {
        ContactRetaliation {
            damage,
            cooldown,
            cooldowns: BTreeMap::new(),
        }
    }

    pub fn is_cooling_down(&self, target: EntityId) -> bool {
        self.cooldowns.contains_key(&target)
    }
}

impl AugmentBehavior for ContactRetaliation {
    fn restore(&mut self, id: &AugmentId, state: &PersistentState) -> Result<(), AugmentError> {
        match state {
            PersistentState::ContactRetaliation { cooldowns } => {
                self.cooldowns = cooldowns
                    .iter()
                    .filter(|(_, left)| left.is_finite() && **left > 0.0)
                    .map(|(target, left)| (*target, *left))
                    .collect();
                Ok(())
            }
            other => Err(AugmentError::invalid_state(
                id,
                format!("expected contact_retaliation state, got `{}`", other.type_name()),
            )),
        }
    }

    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        let delta = ctx.delta();
        if delta > 0.0 {
            self.cooldowns.retain(|_, left| {
                *left -= delta;
                *left > 0.0
            });
        }
        Ok(())
    }

    fn on_contact(&mut self, contact: &mut Contact<'_>, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if contact.other == ctx.owner() || self.is_cooling_down(contact.other) {
            return Ok(());
        }
        let Some(target) = contact.target.as_deref_mut() else {
            return Ok(());
        };

        target.receive_damage(
            self.damage,
            0.0,
            Some(contact.closest_point),
            DamageSource::contact(ctx.owner()),
        );
        if self.cooldown > 0.0 {
            self.cooldowns.insert(contact.other, self.cooldown);
        }
        tracing::debug!(
            augment = %ctx.augment_id(),
            agent = %ctx.owner(),
            target = %contact.other,
            damage = self.damage,
            "contact retaliation"
        );
        Ok(())
    }

    fn capture_state(&self) -> Option<PersistentState> {
        Some(PersistentState::ContactRetaliation {
            cooldowns: self.cooldowns.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Dummy, Harness};
    use glam::DVec2;

    fn contact_with(dummy: &mut Dummy) -> Contact<'_> {
        Contact {
            other: dummy.id,
            target: Some(dummy),
            closest_point: DVec2::new(1.0, 0.0),
        }
    }

    #[test]
    fn test_damages_target_then_cools_down() {
        let mut h = Harness::new("spikes");
        let mut spikes = ContactRetaliation::new(15.0, 1.0);
        let mut dummy = Dummy::new(7);

        spikes.on_contact(&mut contact_with(&mut dummy), &mut h.ctx()).unwrap();
        spikes.on_contact(&mut contact_with(&mut dummy), &mut h.ctx()).unwrap();
        assert_eq!(dummy.hits, vec![15.0]);

        h.delta = 1.0;
        spikes.execute_effects(&mut h.ctx()).unwrap();
        spikes.on_contact(&mut contact_with(&mut dummy), &mut h.ctx()).unwrap();
        assert_eq!(dummy.hits, vec![15.0, 15.0]);
    }

    #[test]
    fn test_ignores_self_and_non_damageable() {
        let mut h = Harness::new("spikes");
        let mut spikes = ContactRetaliation::new(15.0, 1.0);

        let mut own_hull = Dummy::new(h.owner.0);
        spikes.on_contact(&mut contact_with(&mut own_hull), &mut h.ctx()).unwrap();
        assert!(own_hull.hits.is_empty());

        let mut rock = Contact {
            other: EntityId(99),
            target: None,
            closest_point: DVec2::ZERO,
        };
        spikes.on_contact(&mut rock, &mut h.ctx()).unwrap();
        assert!(!spikes.is_cooling_down(EntityId(99)));
    }

    #[test]
    fn test_cooldowns_survive_capture() {
        let mut h = Harness::new("spikes");
        let mut spikes = ContactRetaliation::new(15.0, 2.0);
        let mut dummy = Dummy::new(3);
        spikes.on_contact(&mut contact_with(&mut dummy), &mut h.ctx()).unwrap();

        let state = spikes.capture_state().unwrap();
        let mut restored = ContactRetaliation::new(15.0, 2.0);
        restored.restore(&AugmentId::from("spikes"), &state).unwrap();
        assert!(restored.is_cooling_down(EntityId(3)));
    }
}
