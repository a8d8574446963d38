/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Core(#[from] motify_core::MotifyError),

    #[error(transparent)]
    Playback(#[from] motify_playback::PlaybackError),

    #[error(transparent)]
    Client(#[from] motify_client::ClientError),

    #[error(transparent)]
    Timer(#[from] motify_timer::TimerError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<motify_storage::StorageError> for CliError {
    fn from(err: motify_storage::StorageError) -> Self {
        CliError::Core(err.into())
    }
}
