//! Now-playing surface
//!
//! Metadata published for a system media surface and the remote commands it
//! can send back.

use motify_core::{ClockFormat, MediaTime, Track, TrackId};
use serde::{Deserialize, Serialize};
use url::Url;

/// Metadata for the now-playing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingInfo {
    /// Playing track
    pub track_id: TrackId,
    /// Title
    pub title: String,
    /// Author/genre label
    pub genre: String,
    /// Artwork locator
    pub artwork: Url,
    /// Track duration
    pub duration: MediaTime,
    /// Elapsed time
    pub elapsed: MediaTime,
    /// 1.0 while playing, 0.0 while paused
    pub rate: f32,
}

impl NowPlayingInfo {
    /// Build the metadata for `track`
    pub fn new(track: &Track, elapsed: MediaTime, is_playing: bool) -> Self {
        Self {
            track_id: track.id.clone(),
            title: track.title.clone(),
            genre: track.genre.clone(),
            artwork: track.artwork.clone(),
            duration: track.duration,
            elapsed,
            rate: if is_playing { 1.0 } else { 0.0 },
        }
    }
}

/// Command received from the now-playing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemoteCommand {
    /// Resume playback
    Play,
    /// Pause playback
    Pause,
    /// Toggle between play and pause
    TogglePlayPause,
    /// Skip to the next track
    Next,
    /// Go back
    Previous,
    /// Jump to a position
    Seek(MediaTime),
}

/// Elapsed and remaining labels for a track timeline
///
/// Tracks of an hour or more use `H:MM:SS`, shorter ones `M:SS`. The
/// remaining label is prefixed with `-`. Without a track both read `--:--`.
pub fn timeline(track: Option<&Track>, current: MediaTime) -> (String, String) {
    let Some(track) = track else {
        return ("--:--".to_string(), "--:--".to_string());
    };

    let format = if track.duration.whole_seconds() >= 3600 {
        ClockFormat::Hours
    } else {
        ClockFormat::Minutes
    };
    let elapsed = MediaTime::from_seconds(current.whole_seconds() as f64);
    let remaining = MediaTime::from_seconds(
        (track.duration.whole_seconds() - current.whole_seconds()) as f64,
    );

    (
        elapsed.format_clock(format),
        format!("-{}", remaining.format_clock(format)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(seconds: f64) -> Track {
        Track::new(
            TrackId::new("t"),
            "Title",
            "Genre",
            Url::parse("https://cdn.test/t.mp3").unwrap(),
            Url::parse("https://cdn.test/t.jpg").unwrap(),
            "",
            MediaTime::from_seconds(seconds),
        )
    }

    #[test]
    fn timeline_without_track() {
        assert_eq!(
            timeline(None, MediaTime::ZERO),
            ("--:--".to_string(), "--:--".to_string())
        );
    }

    #[test]
    fn timeline_short_track() {
        let track = create_test_track(185.0);
        let (elapsed, remaining) = timeline(Some(&track), MediaTime::from_seconds(65.4));
        assert_eq!(elapsed, "1:05");
        assert_eq!(remaining, "-2:00");
    }

    #[test]
    fn timeline_long_track_uses_hours() {
        let track = create_test_track(3725.0);
        let (elapsed, remaining) = timeline(Some(&track), MediaTime::from_seconds(5.0));
        assert_eq!(elapsed, "0:00:05");
        assert_eq!(remaining, "-1:02:00");
    }

    #[test]
    fn info_rate_follows_playing_flag() {
        let track = create_test_track(60.0);
        assert_eq!(NowPlayingInfo::new(&track, MediaTime::ZERO, true).rate, 1.0);
        assert_eq!(NowPlayingInfo::new(&track, MediaTime::ZERO, false).rate, 0.0);
    }
}
