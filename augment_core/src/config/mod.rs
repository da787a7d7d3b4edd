//! Configuration loading from TOML files

mod augments;
mod constants;

pub use augments::{default_augments, load_augment_definitions, parse_augment_definitions, AugmentsConfig};
pub use constants::ArenaConstants;

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

impl From<crate::error::AugmentError> for ConfigError {
    fn from(err: crate::error::AugmentError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let result: Result<ArenaConstants, _> = load_toml(Path::new("/nonexistent/arena.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("augment_core_arena_{}.toml", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "tick_rate = 30.0").unwrap();
        }
        let constants: ArenaConstants = load_toml(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!((constants.tick_rate - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_error() {
        let result: Result<ArenaConstants, _> = parse_toml("tick_rate = \"fast\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
