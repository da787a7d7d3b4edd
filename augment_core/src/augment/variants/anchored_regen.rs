//! Anchored regen - heal over time while anchored and out of combat

use crate::augment::{AugmentBehavior, AugmentContext, DamageEvent};
use crate::error::AugmentError;

#[derive(Debug, Clone)]
pub struct AnchoredRegen {
    heal_per_second: f64,
    anchor_delay: f64,
    damage_delay: f64,
    last_damage_at: Option<f64>,
}

impl AnchoredRegen {
    pub fn new(heal_per_second: f64, anchor_delay: f64, damage_delay: f64) -> Self {
        AnchoredRegen {
            heal_per_second,
            anchor_delay,
            damage_delay,
            last_damage_at: None,
        }
    }

    fn ready(&self, ctx: &AugmentContext<'_>) -> bool {
        let anchored_long_enough = ctx.anchored_for().is_some_and(|t| t >= self.anchor_delay);
        let out_of_combat = self
            .last_damage_at
            .map_or(true, |at| ctx.now() - at >= self.damage_delay);
        anchored_long_enough && out_of_combat
    }
}

impl AugmentBehavior for AnchoredRegen {
    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if !ctx.is_active() || ctx.delta() <= 0.0 || !self.ready(ctx) {
            return Ok(());
        }
        let amount = self.heal_per_second * ctx.delta();
        ctx.combat_mut().heal(amount);
        Ok(())
    }

    fn on_take_damage(&mut self, _event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        self.last_damage_at = Some(ctx.now());
        Ok(())
    }

    fn on_take_direct_damage(&mut self, _event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        self.last_damage_at = Some(ctx.now());
        Ok(())
    }
}
