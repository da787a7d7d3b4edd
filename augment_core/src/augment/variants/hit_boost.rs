//! Hit boost - taking damage (re)starts a timed multiplier

use crate::augment::{AugmentBehavior, AugmentContext, DamageEvent};
use crate::error::AugmentError;
use crate::modifier::ModifierCategory;

#[derive(Debug, Clone)]
pub struct HitBoost {
    category: ModifierCategory,
    multiplier: f64,
    duration: f64,
    /// Agent clock time the boost ends
    expires_at: Option<f64>,
}

impl HitBoost {
    pub fn new(category: ModifierCategory, multiplier: f64, duration: f64) -> Self {
        HitBoost {
            category,
            multiplier,
            duration,
            expires_at: None,
        }
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    fn trigger(&mut self, ctx: &mut AugmentContext<'_>) {
        ctx.add_or_refresh_multiplier(self.category, self.multiplier);
        self.expires_at = Some(ctx.now() + self.duration);
    }
}

impl AugmentBehavior for HitBoost {
    fn execute_effects(&mut self, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        let expired = self.expires_at.map_or(true, |t| ctx.now() >= t);
        if expired || !ctx.is_active() {
            self.expires_at = None;
            ctx.remove_multiplier(self.category);
        }
        Ok(())
    }

    fn on_take_damage(&mut self, _event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        self.trigger(ctx);
        Ok(())
    }

    fn on_take_direct_damage(&mut self, _event: &DamageEvent, ctx: &mut AugmentContext<'_>) -> Result<(), AugmentError> {
        self.trigger(ctx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_event, Harness};

    #[test]
    fn test_hit_starts_boost_and_it_expires() {
        let mut h = Harness::new("adrenaline");
        let mut boost = HitBoost::new(ModifierCategory::Speed, 1.5, 2.0);

        boost.on_take_damage(&sample_event(5.0), &mut h.ctx()).unwrap();
        assert!((h.modifiers.effective(ModifierCategory::Speed) - 1.5).abs() < f64::EPSILON);
        assert!((h.derived.move_speed - h.base.move_speed * 1.5).abs() < 1e-9);

        h.now = 1.0;
        boost.execute_effects(&mut h.ctx()).unwrap();
        assert!(h.modifiers.contains(ModifierCategory::Speed, &h.id));

        h.now = 2.0;
        boost.execute_effects(&mut h.ctx()).unwrap();
        assert!(!h.modifiers.contains(ModifierCategory::Speed, &h.id));
        assert!((h.derived.move_speed - h.base.move_speed).abs() < 1e-9);
    }

    #[test]
    fn test_second_hit_refreshes_expiry() {
        let mut h = Harness::new("adrenaline");
        let mut boost = HitBoost::new(ModifierCategory::Damage, 1.25, 2.0);

        boost.on_take_damage(&sample_event(5.0), &mut h.ctx()).unwrap();
        h.now = 1.5;
        boost.on_take_damage(&sample_event(5.0), &mut h.ctx()).unwrap();
        assert_eq!(boost.expires_at(), Some(3.5));

        h.now = 2.5;
        boost.execute_effects(&mut h.ctx()).unwrap();
        assert_eq!(h.modifiers.len(ModifierCategory::Damage), 1);
    }

    #[test]
    fn test_removed_when_window_closes() {
        let mut h = Harness::new("adrenaline");
        let mut boost = HitBoost::new(ModifierCategory::Damage, 1.25, 10.0);
        boost.on_take_damage(&sample_event(5.0), &mut h.ctx()).unwrap();

        h.active = false;
        boost.execute_effects(&mut h.ctx()).unwrap();
        assert!(h.modifiers.is_empty());
    }
}
