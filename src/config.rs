//! Storefront Config

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A duration that must be positive was zero
    #[error("{0} must be greater than zero")]
    InvalidDuration(&'static str),
}

/// Timing and start-up settings for a storefront.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Delay before the assistant's reply is shown, in milliseconds.
    pub chat_reply_delay_ms: u64,

    /// How long a notification stays up, in milliseconds.
    pub notification_duration_ms: u64,

    /// Tab shown when the storefront opens.
    pub initial_tab: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            chat_reply_delay_ms: 500,
            notification_duration_ms: 3000,
            initial_tab: "special-burgers".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a YAML file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a value is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse config from YAML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a value is out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(yaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Check values that deserialisation alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if notifications would never be visible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration("notification_duration_ms"));
        }

        Ok(())
    }

    /// Chat reply latency.
    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    /// Notification lifetime.
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}
