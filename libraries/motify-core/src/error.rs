/// Core error types for MotiFy
use thiserror::Error;

/// Result type alias using `MotifyError`
pub type Result<T> = std::result::Result<T, MotifyError>;

/// Core error type for MotiFy
#[derive(Error, Debug)]
pub enum MotifyError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Network errors (connection, timeout, non-success status)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Remote asset reference could not be turned into a URL
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MotifyError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an invalid locator error
    pub fn invalid_locator(msg: impl Into<String>) -> Self {
        Self::InvalidLocator(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<url::ParseError> for MotifyError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidLocator(err.to_string())
    }
}
