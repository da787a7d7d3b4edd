//! Conditional multipliers - re-evaluated every tick

use crate::augment::{AugmentBehavior, AugmentContext};
use crate::error::AugmentError;
use crate::modifier::ModifierCategory;

/// Multiplier while health is below a fraction of max
#[derive(Debug, Clone)]
pub struct LowHealthBoost {
    category: ModifierCategory,
    multiplier: f64,
    threshold: f64,
}

impl LowHealthBoost {
    pub fn new(category: ModifierCategory, multiplier: f64, threshold: f64) -> Self {
        LowHealthBoost {
            category,
            multiplier,
            threshold,
        }
    }
}

impl AugmentBehavior for LowHealthBoost {
    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if ctx.is_active() && ctx.combat().health_fraction() < self.threshold {
            ctx.add_multiplier_once(self.category, self.multiplier);
        } else {
            ctx.remove_multiplier(self.category);
        }
        Ok(())
    }
}

/// Unconditional multiplier while active
#[derive(Debug, Clone)]
pub struct StaticMultiplier {
    category: ModifierCategory,
    multiplier: f64,
}

impl StaticMultiplier {
    pub fn new(category: ModifierCategory, multiplier: f64) -> Self {
        StaticMultiplier { category, multiplier }
    }
}

impl AugmentBehavior for StaticMultiplier {
    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if ctx.is_active() {
            ctx.add_multiplier_once(self.category, self.multiplier);
        } else {
            ctx.remove_multiplier(self.category);
        }
        Ok(())
    }
}
