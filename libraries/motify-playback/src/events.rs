//! Playback Events
//!
//! Change notifications for front ends. The controller queues events as it
//! mutates state; the session drains them, persists what changed and
//! broadcasts them to subscribers.

use crate::now_playing::NowPlayingInfo;
use motify_core::{MediaTime, RepeatOption, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playing flag changed
    StateChanged {
        /// Whether the engine is now playing
        is_playing: bool,
    },

    /// A different track was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Queue changed (tracks added/removed/reordered)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// History gained or lost entries
    HistoryChanged {
        /// New history length
        length: usize,
    },

    /// Favorites list changed
    FavoritesChanged {
        /// Favorite ids, most recent first
        favorites: Vec<TrackId>,
    },

    /// Autoplay toggled
    AutoplayChanged {
        /// New value
        enabled: bool,
    },

    /// Repeat option advanced
    RepeatChanged {
        /// New value
        option: RepeatOption,
    },

    /// Position sampled or sought
    TimeUpdated {
        /// Current playback position
        time: MediaTime,
    },

    /// Now-playing metadata to publish
    NowPlaying(NowPlayingInfo),

    /// Catalog replaced after a refresh
    CatalogChanged {
        /// Number of tracks
        count: usize,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Frequent position updates, usually not worth logging
    pub fn is_time_update(&self) -> bool {
        matches!(self, Self::TimeUpdated { .. })
    }
}
