use motify_core::MotifyError;
use thiserror::Error;

/// Errors from activity and timer operations
#[derive(Error, Debug)]
pub enum TimerError {
    /// Index outside the activity list
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// No activity with this id
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    /// Core error (storage)
    #[error(transparent)]
    Core(#[from] MotifyError),
}

/// Result type for timer operations
pub type Result<T> = std::result::Result<T, TimerError>;
