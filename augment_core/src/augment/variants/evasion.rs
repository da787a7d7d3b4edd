//! Evasion - chance to ignore the shield and/or health portion of a hit

use crate::augment::{AugmentBehavior, AugmentContext, DamageIntercept};
use crate::error::AugmentError;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Evasion {
    shield_ignore_chance: f64,
    health_ignore_chance: f64,
}

impl Evasion {
    pub fn new(shield_ignore_chance: f64, health_ignore_chance: f64) -> Self {
        Evasion {
            shield_ignore_chance,
            health_ignore_chance,
        }
    }
}

fn roll(ctx: &mut AugmentContext<'_>, chance: f64) -> bool {
    chance > 0.0 && ctx.rng().gen::<f64>() < chance
}

impl AugmentBehavior for Evasion {
    fn on_before_take_damage(
        &mut self,
        hit: &mut DamageIntercept,
        ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        // Independent rolls, shield first
        if roll(ctx, self.shield_ignore_chance) {
            hit.shield_ignored = true;
        }
        if roll(ctx, self.health_ignore_chance) {
            hit.health_ignored = true;
        }
        Ok(())
    }

    fn on_before_take_direct_damage(
        &mut self,
        hit: &mut DamageIntercept,
        ctx: &mut AugmentContext<'_>,
    ) -> Result<(), AugmentError> {
        if roll(ctx, self.health_ignore_chance) {
            hit.health_ignored = true;
        }
        Ok(())
    }
}
