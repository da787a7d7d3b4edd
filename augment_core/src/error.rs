//! Augment runtime errors
//!
//! None of these are fatal to a match. The agent isolates every hook call,
//! logs the error and carries on with the remaining hooks.

use crate::types::AugmentId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AugmentError {
    #[error("augment `{augment}` cannot restore state: {reason}")]
    InvalidState { augment: AugmentId, reason: String },
    #[error("augment `{augment}` hook failed: {reason}")]
    HookFailed { augment: AugmentId, reason: String },
    #[error("augment `{augment}` has invalid tunable `{field}`: {reason}")]
    InvalidTunable {
        augment: AugmentId,
        field: &'static str,
        reason: String,
    },
}

impl AugmentError {
    pub fn invalid_state(augment: &AugmentId, reason: impl Into<String>) -> Self {
        AugmentError::InvalidState {
            augment: augment.clone(),
            reason: reason.into(),
        }
    }

    pub fn hook_failed(augment: &AugmentId, reason: impl Into<String>) -> Self {
        AugmentError::HookFailed {
            augment: augment.clone(),
            reason: reason.into(),
        }
    }
}
