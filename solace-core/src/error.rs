//! Error types for solace

use thiserror::Error;

/// The main error type for solace operations
#[derive(Error, Debug)]
pub enum Error {
    /// Login rejected: empty or malformed username
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Session-scoped operation without a valid session
    #[error("No active session")]
    NoActiveSession,

    /// Empty or whitespace-only chat input
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Response generator failed or timed out
    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A specialized Result type for solace operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
