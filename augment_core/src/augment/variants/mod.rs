//! Built-in augment variants, one per [`AugmentKind`]

mod anchored_regen;
mod conditional;
mod contact_retaliation;
mod emergency_heal;
mod evasion;
mod hit_boost;
mod max_health_bonus;
mod shield_refill;

pub use anchored_regen::AnchoredRegen;
pub use conditional::{LowHealthBoost, StaticMultiplier};
pub use contact_retaliation::ContactRetaliation;
pub use emergency_heal::EmergencyHeal;
pub use evasion::Evasion;
pub use hit_boost::HitBoost;
pub use max_health_bonus::MaxHealthBonus;
pub use shield_refill::ShieldRefill;

use super::{AugmentBehavior, AugmentDefinition, AugmentKind};

/// Augment with no behavior; backs the empty slot
#[derive(Debug, Clone, Default)]
pub struct NoOp;

impl AugmentBehavior for NoOp {}

/// Build the behavior for a definition's kind
pub fn build(definition: &AugmentDefinition) -> Box<dyn AugmentBehavior> {
    match &definition.kind {
        AugmentKind::None => Box::new(NoOp),
        AugmentKind::EmergencyHeal { heal_fraction } => Box::new(EmergencyHeal::new(*heal_fraction)),
        AugmentKind::ShieldRefill => Box::new(ShieldRefill::new()),
        AugmentKind::HitBoost {
            category,
            multiplier,
            duration,
        } => Box::new(HitBoost::new(*category, *multiplier, *duration)),
        AugmentKind::Evasion {
            shield_ignore_chance,
            health_ignore_chance,
        } => Box::new(Evasion::new(*shield_ignore_chance, *health_ignore_chance)),
        AugmentKind::AnchoredRegen {
            heal_per_second,
            anchor_delay,
            damage_delay,
        } => Box::new(AnchoredRegen::new(*heal_per_second, *anchor_delay, *damage_delay)),
        AugmentKind::MaxHealthBonus { bonus } => Box::new(MaxHealthBonus::new(*bonus)),
        AugmentKind::LowHealthBoost {
            category,
            multiplier,
            threshold,
        } => Box::new(LowHealthBoost::new(*category, *multiplier, *threshold)),
        AugmentKind::StaticMultiplier { category, multiplier } => {
            Box::new(StaticMultiplier::new(*category, *multiplier))
        }
        AugmentKind::ContactRetaliation { damage, cooldown } => {
            Box::new(ContactRetaliation::new(*damage, *cooldown))
        }
    }
}
