//! Error types for playback management

use motify_core::MotifyError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty when advancing
    #[error("No next track in queue")]
    NoNextTrack,

    /// History is empty when going back
    #[error("No previous track in history")]
    NoPreviousTrack,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Media engine error
    #[error("Media engine error: {0}")]
    Engine(String),

    /// The playback session has shut down
    #[error("Playback session closed")]
    SessionClosed,

    /// Error from a collaborating service
    #[error(transparent)]
    Core(#[from] MotifyError),
}

impl PlaybackError {
    /// Navigation errors are expected and callers usually treat them as no-ops
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::NoNextTrack | Self::NoPreviousTrack)
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
