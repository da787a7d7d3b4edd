//! Augment definitions - immutable authored templates

use crate::error::AugmentError;
use crate::modifier::ModifierCategory;
use crate::types::{AugmentId, Round};
use serde::{Deserialize, Serialize};

/// How many rounds an augment stays active after acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum ActiveRounds {
    #[default]
    Unlimited,
    Rounds(u32),
}

impl From<Option<u32>> for ActiveRounds {
    fn from(value: Option<u32>) -> Self {
        value.map_or(ActiveRounds::Unlimited, ActiveRounds::Rounds)
    }
}

impl From<ActiveRounds> for Option<u32> {
    fn from(value: ActiveRounds) -> Self {
        match value {
            ActiveRounds::Unlimited => None,
            ActiveRounds::Rounds(n) => Some(n),
        }
    }
}

impl ActiveRounds {
    /// Active iff unlimited or `0 <= current - acquired < n`
    pub fn covers(&self, round_acquired: Round, current_round: Round) -> bool {
        let Some(elapsed) = current_round.checked_sub(round_acquired) else {
            return false;
        };
        match self {
            ActiveRounds::Unlimited => true,
            ActiveRounds::Rounds(n) => elapsed < *n,
        }
    }

    /// Whether the window has fully elapsed and can never cover a later round
    pub fn has_elapsed(&self, round_acquired: Round, current_round: Round) -> bool {
        match self {
            ActiveRounds::Unlimited => false,
            ActiveRounds::Rounds(n) => current_round.saturating_sub(round_acquired) >= *n,
        }
    }
}

/// Per-type behavior and tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AugmentKind {
    /// Empty slot
    None,
    /// Survive one lethal hit per loadout entry
    EmergencyHeal {
        /// Fraction of max health restored (e.g., 0.75 = 75%)
        heal_fraction: f64,
    },
    /// Refill an empty shield once per round
    ShieldRefill,
    /// Timed multiplier (re)started by taking damage
    HitBoost {
        category: ModifierCategory,
        multiplier: f64,
        /// Seconds
        duration: f64,
    },
    /// Chance to ignore the shield and/or health portion of a hit
    Evasion {
        #[serde(default)]
        shield_ignore_chance: f64,
        #[serde(default)]
        health_ignore_chance: f64,
    },
    /// Heal over time while anchored and out of combat
    AnchoredRegen {
        heal_per_second: f64,
        /// Seconds anchored before healing starts
        #[serde(default = "default_anchor_delay")]
        anchor_delay: f64,
        /// Seconds since the last hit before healing starts
        #[serde(default = "default_damage_delay")]
        damage_delay: f64,
    },
    /// Flat max health bonus while active
    MaxHealthBonus { bonus: f64 },
    /// Multiplier while health is below a fraction of max
    LowHealthBoost {
        category: ModifierCategory,
        multiplier: f64,
        /// Health fraction below which the boost applies (e.g., 0.3 = 30%)
        threshold: f64,
    },
    /// Unconditional multiplier while active
    StaticMultiplier {
        category: ModifierCategory,
        multiplier: f64,
    },
    /// Damage whatever rams the ship
    ContactRetaliation {
        damage: f64,
        /// Seconds before the same target can be hit again
        #[serde(default = "default_contact_cooldown")]
        cooldown: f64,
    },
}

fn default_anchor_delay() -> f64 {
    1.0
}
fn default_damage_delay() -> f64 {
    3.0
}
fn default_contact_cooldown() -> f64 {
    0.5
}

/// Immutable augment template, shared by reference across agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentDefinition {
    pub id: AugmentId,
    pub display_name: String,
    /// Duration in rounds (absent = unlimited)
    #[serde(default)]
    pub max_active_rounds: ActiveRounds,
    pub kind: AugmentKind,
}

impl AugmentDefinition {
    pub fn new(id: impl Into<AugmentId>, display_name: impl Into<String>, kind: AugmentKind) -> Self {
        AugmentDefinition {
            id: id.into(),
            display_name: display_name.into(),
            max_active_rounds: ActiveRounds::Unlimited,
            kind,
        }
    }

    /// Limit the augment to `rounds` rounds
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.max_active_rounds = ActiveRounds::Rounds(rounds);
        self
    }

    /// The "no augment" template
    pub fn none() -> Self {
        AugmentDefinition::new("none", "None", AugmentKind::None)
    }

    /// Check tunables are in range
    pub fn validate(&self) -> Result<(), AugmentError> {
        let check = |ok: bool, field: &'static str, reason: &str| {
            if ok {
                Ok(())
            } else {
                Err(AugmentError::InvalidTunable {
                    augment: self.id.clone(),
                    field,
                    reason: reason.to_string(),
                })
            }
        };

        check(!self.id.as_str().is_empty(), "id", "must not be empty")?;
        check(
            self.max_active_rounds != ActiveRounds::Rounds(0),
            "max_active_rounds",
            "must be at least 1",
        )?;

        match &self.kind {
            AugmentKind::None | AugmentKind::ShieldRefill => Ok(()),
            AugmentKind::EmergencyHeal { heal_fraction } => check(
                *heal_fraction > 0.0 && *heal_fraction <= 1.0,
                "heal_fraction",
                "must be in (0, 1]",
            ),
            AugmentKind::HitBoost {
                multiplier, duration, ..
            } => {
                check(*multiplier > 0.0, "multiplier", "must be positive")?;
                check(*duration >= 0.0, "duration", "must not be negative")
            }
            AugmentKind::Evasion {
                shield_ignore_chance,
                health_ignore_chance,
            } => {
                check(
                    (0.0..=1.0).contains(shield_ignore_chance),
                    "shield_ignore_chance",
                    "must be in [0, 1]",
                )?;
                check(
                    (0.0..=1.0).contains(health_ignore_chance),
                    "health_ignore_chance",
                    "must be in [0, 1]",
                )
            }
            AugmentKind::AnchoredRegen {
                heal_per_second,
                anchor_delay,
                damage_delay,
            } => {
                check(*heal_per_second >= 0.0, "heal_per_second", "must not be negative")?;
                check(*anchor_delay >= 0.0, "anchor_delay", "must not be negative")?;
                check(*damage_delay >= 0.0, "damage_delay", "must not be negative")
            }
            AugmentKind::MaxHealthBonus { bonus } => {
                check(*bonus >= 0.0, "bonus", "must not be negative")
            }
            AugmentKind::LowHealthBoost {
                multiplier, threshold, ..
            } => {
                check(*multiplier > 0.0, "multiplier", "must be positive")?;
                check(*threshold > 0.0 && *threshold <= 1.0, "threshold", "must be in (0, 1]")
            }
            AugmentKind::StaticMultiplier { multiplier, .. } => {
                check(*multiplier > 0.0, "multiplier", "must be positive")
            }
            AugmentKind::ContactRetaliation { damage, cooldown } => {
                check(*damage >= 0.0, "damage", "must not be negative")?;
                check(*cooldown >= 0.0, "cooldown", "must not be negative")
            }
        }
    }
}
