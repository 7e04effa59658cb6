use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::logging::{LogFormat, TextLogging};

/// Root configuration structure for mnemos.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSection,

    /// In-memory store settings
    #[serde(default)]
    pub store: StoreSection,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Filter directive used when neither `MNEMOS_LOG` nor `RUST_LOG` is set
    #[serde(default = "default_level")]
    pub level: String,

    /// Stderr format: "pretty", "json" or "compact"
    #[serde(default = "default_format")]
    pub format: String,

    /// How much user text may appear in log lines
    #[serde(default)]
    pub privacy: PrivacySection,
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacySection {
    /// "none", "truncate" or "full"
    #[serde(default = "default_log_text")]
    pub log_text: String,

    /// Characters kept when `log_text = "truncate"`
    #[serde(default = "default_truncate_length")]
    pub truncate_length: usize,
}

/// `[store]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Capacity hint for the artifact map
    #[serde(default)]
    pub initial_capacity: usize,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    LogFormat::default().as_str().to_string()
}

fn default_log_text() -> String {
    TextLogging::default().as_str().to_string()
}

fn default_truncate_length() -> usize {
    80
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: default_level(), format: default_format(), privacy: PrivacySection::default() }
    }
}

impl Default for PrivacySection {
    fn default() -> Self {
        Self { log_text: default_log_text(), truncate_length: default_truncate_length() }
    }
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).map_err(|e| Error::Config(ConfigError::from(e).to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyLogLevel.to_string()));
        }

        if LogFormat::parse_str(&self.logging.format).is_none() {
            return Err(Error::Config(
                ConfigError::InvalidLogFormat(self.logging.format.clone()).to_string(),
            ));
        }

        if TextLogging::parse_str(&self.logging.privacy.log_text).is_none() {
            return Err(Error::Config(
                ConfigError::InvalidTextLogging(self.logging.privacy.log_text.clone()).to_string(),
            ));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# Mnemos Configuration Example

[logging]
# Filter directive; MNEMOS_LOG or RUST_LOG take precedence when set
level = "warn"
# Stderr format: "pretty", "json", or "compact"
format = "pretty"

[logging.privacy]
# How artifact text and queries appear in logs: "none", "truncate", or "full"
log_text = "truncate"
truncate_length = 80

[store]
# Number of artifacts to reserve room for up front
initial_capacity = 0
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid log format: {0}")]
    InvalidLogFormat(String),

    #[error("invalid text logging mode: {0}")]
    InvalidTextLogging(String),

    #[error("log level must not be empty")]
    EmptyLogLevel,

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}
