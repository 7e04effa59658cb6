use thiserror::Error;

/// Result type alias for mnemos-core
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the ambient layer (configuration and logging)
///
/// Store operations never fail; only loading configuration and installing
/// the tracing subscriber can.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Logging initialization errors
    #[error("logging error: {0}")]
    Logging(String),
}
