/// Track domain type
use crate::types::{MediaTime, TrackId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;

/// Playable catalog item
///
/// Equality and hashing use the identifier only; use
/// [`Track::same_contents`] to compare every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Author/genre label shown under the title
    pub genre: String,

    /// Audio resource locator
    pub audio: Url,

    /// Artwork resource locator
    pub artwork: Url,

    /// Free-text description
    pub description: String,

    /// Track duration
    pub duration: MediaTime,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        genre: impl Into<String>,
        audio: Url,
        artwork: Url,
        description: impl Into<String>,
        duration: MediaTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            audio,
            artwork,
            description: description.into(),
            duration,
        }
    }

    /// Compare every field, not just the identifier
    pub fn same_contents(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.genre == other.genre
            && self.audio == other.audio
            && self.artwork == other.artwork
            && self.description == other.description
            && self.duration == other.duration
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Track record as served by the remote catalog
///
/// Asset fields hold unresolved references (plain URLs or storage references).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTrackRecord {
    /// Track identifier
    pub id: String,
    /// Track title
    pub title: String,
    /// Author/genre label
    pub genre: String,
    /// Audio reference
    pub audio: String,
    /// Artwork reference
    pub artwork: String,
    /// Description
    pub description: String,
    /// Duration in seconds, when the catalog knows it
    #[serde(default)]
    pub duration: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, title: &str) -> Track {
        Track::new(
            TrackId::new(id),
            title,
            "Lo-Fi",
            Url::parse("https://cdn.example.com/a.mp3").unwrap(),
            Url::parse("https://cdn.example.com/a.jpg").unwrap(),
            "",
            MediaTime::from_seconds(60.0),
        )
    }

    #[test]
    fn equality_is_by_identifier() {
        let a = track("1", "First");
        let b = track("1", "Renamed");
        assert_eq!(a, b);
        assert!(!a.same_contents(&b));
        assert!(a.same_contents(&a.clone()));
    }

    #[test]
    fn remote_record_duration_is_optional() {
        let record: RemoteTrackRecord = serde_json::from_value(serde_json::json!({
            "id": "1",
            "title": "Title",
            "genre": "Genre",
            "audio": "gs://bucket/a.mp3",
            "artwork": "https://cdn.example.com/a.jpg",
            "description": "Desc"
        }))
        .unwrap();
        assert_eq!(record.duration, None);
    }
}
