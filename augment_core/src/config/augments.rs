//! Augment definition loading

use super::ConfigError;
use crate::augment::AugmentDefinition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for augment definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentsConfig {
    #[serde(rename = "augments")]
    pub augments: Vec<AugmentDefinition>,
}

impl AugmentsConfig {
    /// Check every definition's tunables and that ids are unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for definition in &self.augments {
            definition.validate()?;
            if !seen.insert(definition.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate augment id `{}`",
                    definition.id
                )));
            }
        }
        Ok(())
    }
}

/// Load augment definitions from a TOML file
pub fn load_augment_definitions(path: &Path) -> Result<Vec<AugmentDefinition>, ConfigError> {
    let config: AugmentsConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config.augments)
}

/// Load augment definitions from a TOML string
pub fn parse_augment_definitions(content: &str) -> Result<Vec<AugmentDefinition>, ConfigError> {
    let config: AugmentsConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config.augments)
}

/// Get the bundled augment definitions
pub fn default_augments() -> Vec<AugmentDefinition> {
    let toml = include_str!("../../config/augments.toml");
    parse_augment_definitions(toml).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "bundled augments failed to load");
        vec![AugmentDefinition::none()]
    })
}
