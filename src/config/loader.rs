//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `controller.password`.
pub const PASSWORD_ENV: &str = "LBAAS_RELAY_PASSWORD";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values that take precedence over the config file.
///
/// Applied before validation, so an override is checked like any file value.
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    pub password: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Overrides taken from the process environment.
    pub fn from_env() -> Self {
        Self {
            password: std::env::var(PASSWORD_ENV).ok(),
            log_level: None,
        }
    }

    fn apply(&self, config: &mut RelayConfig) {
        if let Some(password) = &self.password {
            config.controller.password = password.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    load_config_with(path, &ConfigOverrides::from_env())
}

/// Load a TOML file, apply `overrides`, then validate.
pub fn load_config_with(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, overrides)
}

/// Parse configuration text, apply `overrides`, then validate.
pub fn parse_config(content: &str, overrides: &ConfigOverrides) -> Result<RelayConfig, ConfigError> {
    let mut config: RelayConfig = toml::from_str(content)?;
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
