//! Error types for the zhimo client.

use thiserror::Error;

/// Result type alias using the zhimo Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for zhimo client operations.
///
/// Service and container errors display as their bare message so they can be
/// shown to a user without further formatting.
#[derive(Error, Debug)]
pub enum Error {
    /// A resource service call failed; the message is already normalized
    #[error("{0}")]
    Service(String),

    /// The backend answered with `success: false`
    #[error("{0}")]
    Api(String),

    /// The document status poller ran out of attempts
    #[error("{0}")]
    Timeout(String),

    /// Durable key/value storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Human-readable message suitable for a container's error flag.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
