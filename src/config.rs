//! Configuration management
//!
//! Defaults for toolkit operations, loaded from an optional
//! `yaml-toolkit.toml` with environment overrides.

use config::{Config, ConfigError, Environment, File};
use log::warn;
use serde::Deserialize;

use crate::storage::DEFAULT_LOGGER_CHANNEL;

/// Toolkit-wide defaults consumed by the demo binary.
#[derive(Debug, Deserialize, Clone)]
pub struct ToolkitConfig {
    /// Logger channel passed to storage operations.
    pub logger_channel: String,

    /// Whether failures are also surfaced through the messenger.
    pub verbose: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        ToolkitConfig {
            logger_channel: DEFAULT_LOGGER_CHANNEL.to_string(),
            verbose: false,
        }
    }
}

impl ToolkitConfig {
    /// Load configuration, falling back to defaults when no file or
    /// environment override is present.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load configuration, using defaults: {err}");
                ToolkitConfig::default()
            }
        }
    }

    fn try_load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("logger_channel", DEFAULT_LOGGER_CHANNEL)?
            .set_default("verbose", false)?
            .add_source(File::with_name("yaml-toolkit").required(false))
            .add_source(Environment::with_prefix("YAML_TOOLKIT"))
            .build()?;

        let config: ToolkitConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.logger_channel.is_empty() {
            return Err(ConfigError::Message(
                "logger_channel cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
