pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigError, LoggingSection, PrivacySection, StoreSection};
pub use error::{Error, Result};
pub use logging::{LogFormat, LoggingConfig, PrivacyConfig, TextLogging, init_logging, redact_text};
