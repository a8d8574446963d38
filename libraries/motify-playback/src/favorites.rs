//! Favorite tracks
//!
//! Ordered set of track ids, most recently favorited first.

use motify_core::TrackId;

/// Ordered, duplicate-free list of favorite track ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: Vec<TrackId>,
}

impl Favorites {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from a persisted list
    ///
    /// Duplicates keep their first position.
    pub fn from_ids(ids: Vec<TrackId>) -> Self {
        let mut favorites = Self::new();
        for id in ids {
            if !favorites.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    /// Mark or unmark a track. Returns true when the list changed.
    pub fn set(&mut self, id: &TrackId, value: bool) -> bool {
        match (value, self.position(id)) {
            (true, None) => {
                self.ids.insert(0, id.clone());
                true
            }
            (false, Some(index)) => {
                self.ids.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Whether the track is a favorite
    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    /// Rank of the track in the list (0 = most recent)
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.ids.iter().position(|f| f == id)
    }

    /// All favorite ids, most recent first
    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is favorited
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_favorite_goes_first() {
        let mut favorites = Favorites::new();
        assert!(favorites.set(&TrackId::new("a"), true));
        assert!(favorites.set(&TrackId::new("b"), true));

        assert_eq!(favorites.ids(), &[TrackId::new("b"), TrackId::new("a")]);
    }

    #[test]
    fn set_is_idempotent() {
        let mut favorites = Favorites::new();
        favorites.set(&TrackId::new("a"), true);
        assert!(!favorites.set(&TrackId::new("a"), true));
        assert_eq!(favorites.len(), 1);

        assert!(favorites.set(&TrackId::new("a"), false));
        assert!(!favorites.set(&TrackId::new("a"), false));
        assert!(favorites.is_empty());
    }

    #[test]
    fn from_ids_drops_duplicates() {
        let favorites = Favorites::from_ids(vec![
            TrackId::new("a"),
            TrackId::new("b"),
            TrackId::new("a"),
        ]);
        assert_eq!(favorites.ids(), &[TrackId::new("a"), TrackId::new("b")]);
        assert_eq!(favorites.position(&TrackId::new("b")), Some(1));
    }
}
