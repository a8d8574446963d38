//! Error types for the MotiFy HTTP services.

use motify_core::MotifyError;
use thiserror::Error;

/// Errors that can occur when talking to remote services.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid service URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Asset reference in an unknown form
    #[error("Unsupported asset reference: {0}")]
    UnsupportedReference(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl From<ClientError> for MotifyError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ParseError(msg) => MotifyError::decode(msg),
            ClientError::InvalidUrl(msg) | ClientError::UnsupportedReference(msg) => {
                MotifyError::invalid_locator(msg)
            }
            other => MotifyError::network(other.to_string()),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
