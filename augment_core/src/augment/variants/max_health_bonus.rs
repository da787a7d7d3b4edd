//! Max health bonus - flat hull bonus while the augment is active

use crate::augment::{AugmentBehavior, AugmentContext};
use crate::error::AugmentError;

#[derive(Debug, Clone)]
pub struct MaxHealthBonus {
    bonus: f64,
    /// Whether the bonus is currently added to the agent.
    /// Not persisted: a respawned agent starts from base max health.
    applied: bool,
}

impl MaxHealthBonus {
    pub fn new(bonus: f64) -> Self {
        MaxHealthBonus { bonus, applied: false }
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    fn apply(&mut self, ctx: &mut AugmentContext<'_>) {
        let max = ctx.combat().max_health();
        ctx.combat_mut().set_max_health_proportional(max + self.bonus);
        self.applied = true;
    }

    fn revert(&mut self, ctx: &mut AugmentContext<'_>) {
        let max = ctx.combat().max_health();
        ctx.combat_mut().set_max_health_proportional(max - self.bonus);
        self.applied = false;
    }
}

impl AugmentBehavior for MaxHealthBonus {
    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        match (ctx.is_active(), self.applied) {
            (true, false) => self.apply(ctx),
            (false, true) => self.revert(ctx),
            _ => {}
        }
        Ok(())
    }

    fn on_removed(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        if self.applied {
            self.revert(ctx);
        }
        Ok(())
    }
}
