//! Damage resolution - apply a hit to an agent's shield then health

use super::events::CombatEvent;
use super::result::DamageReport;
use crate::agent::Agent;
use crate::augment::DamageEvent;
use crate::types::DamageSource;
use glam::DVec2;

impl Agent {
    /// Apply a shielded hit
    ///
    /// 1. Rejects the hit if the agent is destroyed or the amount is not a
    ///    positive finite number
    /// 2. Runs pre-damage hooks, which may shrink damage or bypass layers
    /// 3. Shield absorbs first
    /// 4. Remainder goes to health, unless health was evaded
    /// 5. Runs post-damage hooks with the original amount
    /// 6. Destroys the agent if health is still depleted
    pub fn apply_damage(
        &mut self,
        amount: f64,
        impact_force: f64,
        hit_point: Option<DVec2>,
        source: DamageSource,
    ) -> DamageReport {
        self.resolve(DamageEvent {
            amount,
            impact_force,
            hit_point,
            source,
            direct: false,
        })
    }

    /// Apply a hit that bypasses the shield entirely
    pub fn apply_direct_damage(
        &mut self,
        amount: f64,
        impact_force: f64,
        hit_point: Option<DVec2>,
        source: DamageSource,
    ) -> DamageReport {
        self.resolve(DamageEvent {
            amount,
            impact_force,
            hit_point,
            source,
            direct: true,
        })
    }

    fn resolve(&mut self, hit: DamageEvent) -> DamageReport {
        let mut report = DamageReport::new(hit.amount, hit.direct);

        if self.is_destroyed() {
            report.rejected = true;
            return report;
        }

        report.shield_before = self.combat.current_shield();
        report.health_before = self.combat.current_health();
        report.shield_after = report.shield_before;
        report.health_after = report.health_before;

        if !hit.amount.is_finite() || hit.amount <= 0.0 {
            report.intercepted = 0.0;
            return report;
        }

        let direction = hit
            .hit_point
            .map(|point| (point - self.position()).normalize_or_zero())
            .unwrap_or(DVec2::ZERO);

        // Step 1: Pre-damage hooks
        let intercept = self.intercept(&hit);
        report.intercepted = intercept.damage;
        report.shield_ignored = intercept.shield_ignored;
        report.health_ignored = intercept.health_ignored;

        let mut remaining = intercept.damage;

        // Step 2: Shield absorbs first
        if !hit.direct
            && !intercept.shield_ignored
            && self.combat.has_shield()
            && self.combat.current_shield() > 0.0
            && remaining > 0.0
        {
            let absorbed = self.combat.absorb_with_shield(remaining);
            remaining -= absorbed;
            report.absorbed_by_shield = absorbed;

            let event = if self.combat.current_shield() <= 0.0 {
                report.shield_broke = true;
                CombatEvent::ShieldBroke {
                    agent: self.id(),
                    hit_point: hit.hit_point,
                    direction,
                    absorbed,
                }
            } else {
                CombatEvent::ShieldHit {
                    agent: self.id(),
                    hit_point: hit.hit_point,
                    direction,
                    absorbed,
                }
            };
            self.events.push(event);
        }

        report.shield_after = self.combat.current_shield();

        // Evaded health: the hit ends here
        if intercept.health_ignored {
            report.health_after = self.combat.current_health();
            tracing::trace!(agent = %self.id(), summary = %report.summary(), "hit resolved");
            return report;
        }

        // Step 3: Remainder to health
        if remaining > 0.0 {
            let taken = self.combat.take_health(remaining);
            report.health_damage = taken;
            self.events.push(CombatEvent::HealthDamaged {
                agent: self.id(),
                hit_point: hit.hit_point,
                direction,
                amount: taken,
            });
        }

        // Step 4: Post-damage hooks
        self.after_damage(&hit);

        report.shield_after = self.combat.current_shield();
        report.health_after = self.combat.current_health();

        // Step 5: Death check
        if self.combat.is_depleted() {
            report.is_killing_blow = self.destroy_towards(direction);
        }

        tracing::trace!(agent = %self.id(), summary = %report.summary(), "hit resolved");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::{AugmentDefinition, AugmentKind};
    use crate::modifier::BaseStats;
    use crate::types::EntityId;
    use std::sync::Arc;

    fn agent() -> Agent {
        Agent::new(EntityId(1), BaseStats::default(), 42)
    }

    fn source() -> DamageSource {
        DamageSource::projectile(EntityId(2))
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut a = agent();
        let report = a.apply_damage(30.0, 0.0, None, source());

        assert!((report.absorbed_by_shield - 30.0).abs() < f64::EPSILON);
        assert!(report.health_damage.abs() < f64::EPSILON);
        assert!((a.combat().current_shield() - 20.0).abs() < f64::EPSILON);
        assert!((a.combat().current_health() - 100.0).abs() < f64::EPSILON);
        assert!(matches!(a.events()[0], CombatEvent::ShieldHit { .. }));
    }

    #[test]
    fn test_overflow_goes_to_health() {
        let mut a = agent();
        let report = a.apply_damage(70.0, 0.0, None, source());

        assert!((report.absorbed_by_shield - 50.0).abs() < f64::EPSILON);
        assert!((report.health_damage - 20.0).abs() < f64::EPSILON);
        assert!(report.shield_broke);
        assert!((a.combat().current_health() - 80.0).abs() < f64::EPSILON);

        let events = a.drain_events();
        assert!(matches!(events[0], CombatEvent::ShieldBroke { .. }));
        assert!(matches!(events[1], CombatEvent::HealthDamaged { .. }));
    }

    #[test]
    fn test_direct_damage_bypasses_shield() {
        let mut a = agent();
        let report = a.apply_direct_damage(30.0, 0.0, None, source());

        assert!(report.direct);
        assert!(report.absorbed_by_shield.abs() < f64::EPSILON);
        assert!((a.combat().current_shield() - 50.0).abs() < f64::EPSILON);
        assert!((a.combat().current_health() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lethal_hit_destroys() {
        let mut a = agent();
        let report = a.apply_direct_damage(150.0, 0.0, Some(DVec2::new(3.0, 4.0)), source());

        assert!(report.is_killing_blow);
        assert!(a.is_destroyed());
        assert!(a.combat().current_health().abs() < f64::EPSILON);

        let destroyed = a.events().iter().find_map(|e| match e {
            CombatEvent::Destroyed { direction, .. } => Some(*direction),
            _ => None,
        });
        let direction = destroyed.expect("destroyed event");
        assert!((direction - DVec2::new(0.6, 0.8)).length() < 1e-9);
    }

    #[test]
    fn test_destroyed_agent_rejects_damage() {
        let mut a = agent();
        a.destroy();
        a.drain_events();

        let report = a.apply_damage(10.0, 0.0, None, source());
        assert!(report.rejected);
        assert!(a.events().is_empty());
        assert!((a.combat().current_shield() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_amounts_are_ignored() {
        let mut a = agent();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let report = a.apply_damage(amount, 0.0, None, source());
            assert!(!report.rejected);
            assert!(report.total_applied().abs() < f64::EPSILON);
        }
        assert!(a.events().is_empty());
        assert!((a.combat().current_health() - 100.0).abs() < f64::EPSILON);
        assert!((a.combat().current_shield() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_health_evasion_stops_pipeline() {
        let mut a = agent();
        a.acquire_augment(
            Arc::new(AugmentDefinition::new(
                "phase",
                "Phase Cloak",
                AugmentKind::Evasion {
                    shield_ignore_chance: 0.0,
                    health_ignore_chance: 1.0,
                },
            )),
            0,
        );

        let report = a.apply_damage(80.0, 0.0, None, source());

        assert!(report.health_ignored);
        assert!((report.absorbed_by_shield - 50.0).abs() < f64::EPSILON);
        assert!((a.combat().current_health() - 100.0).abs() < f64::EPSILON);
        assert!(a.is_alive());
    }

    #[test]
    fn test_shield_bypass_flag() {
        let mut a = agent();
        a.acquire_augment(
            Arc::new(AugmentDefinition::new(
                "needle",
                "Needle",
                AugmentKind::Evasion {
                    shield_ignore_chance: 1.0,
                    health_ignore_chance: 0.0,
                },
            )),
            0,
        );

        a.apply_damage(30.0, 0.0, None, source());
        assert!((a.combat().current_shield() - 50.0).abs() < f64::EPSILON);
        assert!((a.combat().current_health() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_emergency_heal_prevents_death() {
        let mut a = agent();
        a.acquire_augment(
            Arc::new(AugmentDefinition::new(
                "second_wind",
                "Second Wind",
                AugmentKind::EmergencyHeal { heal_fraction: 0.5 },
            )),
            0,
        );

        let report = a.apply_direct_damage(500.0, 0.0, None, source());
        assert!(!report.is_killing_blow);
        assert!(a.is_alive());
        assert!((a.combat().current_health() - 50.0).abs() < 1e-9);

        let report = a.apply_direct_damage(500.0, 0.0, None, source());
        assert!(report.is_killing_blow);
        assert!(a.is_destroyed());
    }
}
