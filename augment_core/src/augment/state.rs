//! Persistent augment state - what survives an agent's destruction

use crate::types::{EntityId, Round};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable per-augment state, tagged by augment type so a mismatched
/// snapshot is rejected rather than misread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersistentState {
    EmergencyHeal {
        triggered: bool,
    },
    ShieldRefill {
        last_used_round: Option<Round>,
    },
    ContactRetaliation {
        /// Per-target seconds left on the cooldown
        cooldowns: BTreeMap<EntityId, f64>,
    },
}

impl PersistentState {
    /// Tag name, for logs
    pub fn type_name(&self) -> &'static str {
        match self {
            PersistentState::EmergencyHeal { .. } => "emergency_heal",
            PersistentState::ShieldRefill { .. } => "shield_refill",
            PersistentState::ContactRetaliation { .. } => "contact_retaliation",
        }
    }

    /// Encode as an opaque JSON blob for hosts that store state externally
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode an opaque JSON blob. Returns `None` for anything unreadable,
    /// which restores as the augment's default state.
    pub fn from_json(blob: &str) -> Option<Self> {
        match serde_json::from_str(blob) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::debug!(error = %err, "discarding unreadable augment state blob");
                None
            }
        }
    }
}
