//! Playback history tracking
//!
//! Maintains a bounded history of played tracks for "previous" functionality

use motify_core::Track;
use std::collections::VecDeque;

/// Playback history with bounded size
///
/// LIFO stack of recently played tracks. Pushing onto a full history
/// discards the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = back)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Add track to history
    ///
    /// If history is full, oldest track is discarded
    pub fn push(&mut self, track: Track) {
        if self.max_size == 0 {
            return;
        }
        if self.tracks.len() >= self.max_size {
            self.tracks.pop_front(); // Remove oldest
        }
        self.tracks.push_back(track);
    }

    /// Most recent track, left in place
    pub fn peek(&self) -> Option<&Track> {
        self.tracks.back()
    }

    /// Pop most recent track from history
    pub fn pop(&mut self) -> Option<Track> {
        self.tracks.pop_back()
    }

    /// Get all history tracks (oldest first)
    pub fn get_all(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use motify_core::{MediaTime, TrackId};
    use url::Url;

    fn create_test_track(id: &str, title: &str) -> Track {
        Track::new(
            TrackId::new(id),
            title,
            "Test Genre",
            Url::parse(&format!("https://cdn.test/{id}.mp3")).unwrap(),
            Url::parse(&format!("https://cdn.test/{id}.jpg")).unwrap(),
            "",
            MediaTime::from_seconds(180.0),
        )
    }

    #[test]
    fn create_history() {
        let history = History::new(10);
        assert_eq!(history.len(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn push_to_history() {
        let mut history = History::new(10);
        history.push(create_test_track("1", "Track 1"));
        history.push(create_test_track("2", "Track 2"));

        assert_eq!(history.len(), 2);
        assert!(!history.is_empty());
    }

    #[test]
    fn peek_most_recent() {
        let mut history = History::new(10);
        history.push(create_test_track("1", "Track 1"));
        history.push(create_test_track("2", "Track 2"));

        let recent = history.peek().unwrap();
        assert_eq!(recent.id.as_str(), "2");

        // Still there
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn pop_is_lifo() {
        let mut history = History::new(10);
        history.push(create_test_track("1", "Track 1"));
        history.push(create_test_track("2", "Track 2"));
        history.push(create_test_track("3", "Track 3"));

        assert_eq!(history.pop().unwrap().id.as_str(), "3");
        assert_eq!(history.pop().unwrap().id.as_str(), "2");
        assert_eq!(history.pop().unwrap().id.as_str(), "1");
        assert!(history.pop().is_none());
    }

    #[test]
    fn full_history_discards_oldest() {
        let mut history = History::new(3);
        for i in 1..=5 {
            history.push(create_test_track(&i.to_string(), "Track"));
        }

        assert_eq!(history.len(), 3);
        let ids: Vec<_> = history.get_all().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4", "5"]);
    }

    #[test]
    fn zero_sized_history_stays_empty() {
        let mut history = History::new(0);
        history.push(create_test_track("1", "Track 1"));
        assert!(history.is_empty());
    }
}
