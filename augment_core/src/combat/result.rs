//! DamageReport - outcome of one damage resolution

use serde::{Deserialize, Serialize};

/// What one call to the damage pipeline did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    // === Input ===
    /// Incoming amount, before interception
    pub incoming: f64,
    /// Amount left after pre-damage hooks
    pub intercepted: f64,
    /// Whether the hit bypassed the shield
    pub direct: bool,

    // === Outcome ===
    pub absorbed_by_shield: f64,
    pub health_damage: f64,

    // === State Changes ===
    pub shield_before: f64,
    pub shield_after: f64,
    pub health_before: f64,
    pub health_after: f64,

    // === Flags ===
    pub shield_ignored: bool,
    pub health_ignored: bool,
    pub shield_broke: bool,
    /// Whether this hit destroyed the agent
    pub is_killing_blow: bool,
    /// The agent was already destroyed; nothing happened
    pub rejected: bool,
}

impl DamageReport {
    pub fn new(incoming: f64, direct: bool) -> Self {
        DamageReport {
            incoming,
            intercepted: incoming,
            direct,
            ..Default::default()
        }
    }

    /// Shield plus health actually removed
    pub fn total_applied(&self) -> f64 {
        self.absorbed_by_shield + self.health_damage
    }

    pub fn health_change(&self) -> f64 {
        self.health_after - self.health_before
    }

    pub fn shield_change(&self) -> f64 {
        self.shield_after - self.shield_before
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        if self.rejected {
            return "Target already destroyed".to_string();
        }

        let mut parts = Vec::new();

        if self.absorbed_by_shield > 0.0 {
            parts.push(format!("{:.0} absorbed by shield", self.absorbed_by_shield));
        }

        if self.health_damage > 0.0 {
            parts.push(format!("{:.0} health damage", self.health_damage));
        }

        if self.shield_ignored {
            parts.push("shield bypassed".to_string());
        }

        if self.health_ignored {
            parts.push("health evaded".to_string());
        }

        if self.shield_broke {
            parts.push("SHIELD DOWN".to_string());
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}
