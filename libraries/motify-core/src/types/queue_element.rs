/// Queue entry wrapping a track
use crate::types::{QueueEntryId, Track};
use serde::{Deserialize, Serialize};

/// A pending play request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueElement {
    /// Identity of this entry (distinct from the track id)
    pub id: QueueEntryId,

    /// Track to play
    pub track: Track,

    /// True when the entry was injected by autoplay rather than requested by the user
    pub autoplay: bool,
}

impl QueueElement {
    /// Create a user-requested entry
    pub fn new(track: Track) -> Self {
        Self {
            id: QueueEntryId::generate(),
            track,
            autoplay: false,
        }
    }

    /// Create an autoplay-injected entry
    pub fn autoplay(track: Track) -> Self {
        Self {
            id: QueueEntryId::generate(),
            track,
            autoplay: true,
        }
    }
}
