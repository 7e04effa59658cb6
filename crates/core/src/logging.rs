//! Structured logging built on the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `MNEMOS_LOG`: Filter directive (like `RUST_LOG`), e.g., `mnemos_store=debug`
//! - `MNEMOS_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//!
//! # Configuration
//!
//! Logging is configured via the `[logging]` section in `mnemos.toml`:
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "pretty"
//!
//! [logging.privacy]
//! log_text = "truncate"
//! truncate_length = 80
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mnemos_core::logging::{self, LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::new().with_level("debug").with_format(LogFormat::Json);
//! logging::init_logging(Some(config))?;
//! # Ok::<(), mnemos_core::Error>(())
//! ```

use crate::Error;
use crate::config::LoggingSection;
use std::env;
use std::io;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    /// All available log formats.
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// How artifact text and queries are written to logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextLogging {
    /// Never log user text.
    None,
    /// Log up to `truncate_length` characters.
    #[default]
    Truncate,
    /// Log text verbatim.
    Full,
}

impl TextLogging {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(TextLogging::None),
            "truncate" => Some(TextLogging::Truncate),
            "full" => Some(TextLogging::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextLogging::None => "none",
            TextLogging::Truncate => "truncate",
            TextLogging::Full => "full",
        }
    }
}

impl FromStr for TextLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextLogging::parse_str(s).ok_or_else(|| format!("invalid text logging mode: {}", s))
    }
}

/// Privacy controls for user text in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivacyConfig {
    pub log_text: TextLogging,
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_text: TextLogging::default(), truncate_length: 80 }
    }
}

/// Runtime logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive for stderr output.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    pub privacy: PrivacyConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::default(), privacy: PrivacyConfig::default() }
    }
}

impl From<LoggingSection> for LoggingConfig {
    fn from(section: LoggingSection) -> Self {
        Self {
            level: section.level,
            format: LogFormat::parse_str(&section.format).unwrap_or_default(),
            privacy: PrivacyConfig {
                log_text: TextLogging::parse_str(&section.privacy.log_text).unwrap_or_default(),
                truncate_length: section.privacy.truncate_length,
            },
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    /// Resolve the filter directive: `MNEMOS_LOG`, then `RUST_LOG`, then the configured level.
    fn filter_directive(&self) -> String {
        env::var("MNEMOS_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.level.clone())
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// `MNEMOS_LOG_FORMAT` wins; pretty output falls back to compact off a TTY.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("MNEMOS_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        match self.format {
            LogFormat::Pretty if !Self::is_tty() => LogFormat::Compact,
            format => format,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Returns [`Error::Logging`] if a global subscriber is already set.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<(), Error> {
    let config = config.unwrap_or_default();
    let directive = config.filter_directive();
    let env_filter = EnvFilter::new(&directive);
    let format = config.detect_format();

    let registry = Registry::default().with(env_filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
            .try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(io::stderr)).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact().with_writer(io::stderr)).try_init(),
    };

    result.map_err(|e| Error::Logging(e.to_string()))?;
    tracing::debug!(filter = %directive, format = format.as_str(), "Logging initialized");
    Ok(())
}

/// Shorten or hide user text before it reaches a log line.
pub fn redact_text(content: &str, privacy: &PrivacyConfig) -> String {
    match privacy.log_text {
        TextLogging::None => "[REDACTED]".to_string(),
        TextLogging::Full => content.to_string(),
        TextLogging::Truncate => {
            let total = content.chars().count();
            if total <= privacy.truncate_length {
                return content.to_string();
            }

            let mut truncated = content.chars().take(privacy.truncate_length).collect::<String>();
            truncated.push_str("...");
            truncated.push_str(&format!(" ({} total chars)", total));
            truncated
        }
    }
}
