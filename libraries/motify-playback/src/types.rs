//! Playback configuration and state snapshot

use motify_core::{MediaTime, QueueElement, RepeatOption, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Maximum history size
    pub history_size: usize,

    /// Position past which "previous" restarts the current track
    pub restart_threshold: Duration,

    /// How often the engine is sampled for the current time
    pub sample_interval: Duration,

    /// Re-queue the playing track when autoplay has nothing else to offer
    pub autoplay_self_loop: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            restart_threshold: Duration::from_secs(2),
            sample_interval: Duration::from_millis(100),
            autoplay_self_loop: false,
        }
    }
}

/// Materialized snapshot of the playback state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Track loaded in the player
    pub current_track_id: Option<TrackId>,

    /// Whether the engine is playing
    pub is_playing: bool,

    /// Last sampled position
    pub current_time: MediaTime,

    /// Pending entries, head first
    pub queue: Vec<QueueElement>,

    /// Previously played tracks, oldest first
    pub history: Vec<Track>,

    /// Favorite track ids, most recent first
    pub favorites: Vec<TrackId>,

    /// Autoplay toggle
    pub autoplay: bool,

    /// Repeat option
    pub repeat_option: RepeatOption,
}

impl PlaybackState {
    /// Track currently loaded, looked up in `catalog`
    pub fn current_track<'a>(&self, catalog: &'a [Track]) -> Option<&'a Track> {
        let id = self.current_track_id.as_ref()?;
        catalog.iter().find(|t| &t.id == id)
    }
}
