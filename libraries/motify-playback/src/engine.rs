//! Media engine abstraction
//!
//! The controller is the only owner of the engine. Platform front ends
//! provide an implementation; [`HeadlessEngine`] keeps time without audio.

use crate::error::Result;
use async_trait::async_trait;
use motify_core::{MediaTime, Track, TrackId};

/// Platform media engine
#[async_trait]
pub trait MediaEngine: Send {
    /// Replace the loaded item with the track's audio
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Whether an item is loaded
    fn has_item(&self) -> bool;

    /// Id of the loaded track
    fn loaded_track_id(&self) -> Option<&TrackId>;

    /// Start or resume output
    fn play(&mut self);

    /// Pause output
    fn pause(&mut self);

    /// Seek without waiting for completion
    fn seek(&mut self, time: MediaTime);

    /// Seek and wait until the engine reports completion
    async fn seek_and_wait(&mut self, time: MediaTime) -> Result<()>;

    /// Current position of the loaded item
    fn position(&self) -> MediaTime;

    /// Whether output is running
    fn is_playing(&self) -> bool;
}

/// Engine without audio output
///
/// Position only moves when [`HeadlessEngine::advance`] is called.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    loaded: Option<(TrackId, MediaTime)>,
    position: MediaTime,
    playing: bool,
}

impl HeadlessEngine {
    /// Create an engine with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the position forward while playing
    ///
    /// Returns true when the loaded item reached its end.
    pub fn advance(&mut self, by: MediaTime) -> bool {
        if !self.playing {
            return false;
        }
        let Some((_, duration)) = &self.loaded else {
            return false;
        };
        let target = MediaTime::from_ticks(self.position.ticks().saturating_add(by.ticks()));
        if *duration > MediaTime::ZERO && target >= *duration {
            self.position = *duration;
            self.playing = false;
            true
        } else {
            self.position = target;
            false
        }
    }
}

#[async_trait]
impl MediaEngine for HeadlessEngine {
    fn load(&mut self, track: &Track) -> Result<()> {
        tracing::debug!(track_id = %track.id, audio = %track.audio, "Loading item");
        self.loaded = Some((track.id.clone(), track.duration));
        self.position = MediaTime::ZERO;
        Ok(())
    }

    fn has_item(&self) -> bool {
        self.loaded.is_some()
    }

    fn loaded_track_id(&self) -> Option<&TrackId> {
        self.loaded.as_ref().map(|(id, _)| id)
    }

    fn play(&mut self) {
        if self.loaded.is_some() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, time: MediaTime) {
        let upper = self
            .loaded
            .as_ref()
            .map_or(MediaTime::ZERO, |(_, duration)| *duration);
        self.position = if upper > MediaTime::ZERO {
            time.clamp(MediaTime::ZERO, upper)
        } else {
            time.max(MediaTime::ZERO)
        };
    }

    async fn seek_and_wait(&mut self, time: MediaTime) -> Result<()> {
        self.seek(time);
        tokio::task::yield_now().await;
        Ok(())
    }

    fn position(&self) -> MediaTime {
        self.position
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn create_test_track(id: &str, seconds: f64) -> Track {
        Track::new(
            TrackId::new(id),
            id,
            "Test Genre",
            Url::parse(&format!("https://cdn.test/{id}.mp3")).unwrap(),
            Url::parse(&format!("https://cdn.test/{id}.jpg")).unwrap(),
            "",
            MediaTime::from_seconds(seconds),
        )
    }

    #[test]
    fn play_requires_loaded_item() {
        let mut engine = HeadlessEngine::new();
        engine.play();
        assert!(!engine.is_playing());

        engine.load(&create_test_track("a", 10.0)).unwrap();
        engine.play();
        assert!(engine.is_playing());
        assert_eq!(engine.loaded_track_id().unwrap().as_str(), "a");
    }

    #[test]
    fn advance_stops_at_end() {
        let mut engine = HeadlessEngine::new();
        engine.load(&create_test_track("a", 3.0)).unwrap();
        engine.play();

        assert!(!engine.advance(MediaTime::from_seconds(2.0)));
        assert_eq!(engine.position(), MediaTime::from_seconds(2.0));

        assert!(engine.advance(MediaTime::from_seconds(2.0)));
        assert_eq!(engine.position(), MediaTime::from_seconds(3.0));
        assert!(!engine.is_playing());
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut engine = HeadlessEngine::new();
        engine.load(&create_test_track("a", 3.0)).unwrap();

        engine.seek(MediaTime::from_seconds(10.0));
        assert_eq!(engine.position(), MediaTime::from_seconds(3.0));

        engine.seek(MediaTime::from_seconds(-1.0));
        assert_eq!(engine.position(), MediaTime::ZERO);
    }

    #[tokio::test]
    async fn seek_and_wait_moves_position() {
        let mut engine = HeadlessEngine::new();
        engine.load(&create_test_track("a", 60.0)).unwrap();

        engine
            .seek_and_wait(MediaTime::from_seconds(30.0))
            .await
            .unwrap();
        assert_eq!(engine.position(), MediaTime::from_seconds(30.0));
    }
}
