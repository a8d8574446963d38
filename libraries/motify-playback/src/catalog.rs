//! Track catalog
//!
//! Remote track list, converted into playable [`Track`]s and cached.

use motify_core::{AssetResolver, CatalogSource, MediaTime, RemoteTrackRecord, Track, TrackId};

/// Outcome of applying a fetched track list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRefresh {
    /// The cached list was replaced
    Updated,
    /// Fetched list was empty or identical to the cache
    Unchanged,
}

/// Ordered list of playable tracks
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Create a catalog from cached tracks
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Replace the cached list with `tracks` when non-empty and different
    pub fn apply(&mut self, tracks: Vec<Track>) -> CatalogRefresh {
        if tracks.is_empty() || same_list(&self.tracks, &tracks) {
            return CatalogRefresh::Unchanged;
        }
        self.tracks = tracks;
        CatalogRefresh::Updated
    }

    /// Fetch the remote list and apply it
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the cached list is left untouched
    pub async fn refresh(
        &mut self,
        source: &dyn CatalogSource,
        resolver: &dyn AssetResolver,
    ) -> motify_core::Result<CatalogRefresh> {
        let tracks = fetch_tracks(source, resolver).await?;
        Ok(self.apply(tracks))
    }
}

/// Fetch every remote record and convert the resolvable ones
///
/// Records whose references cannot be resolved are skipped.
///
/// # Errors
///
/// Returns an error if the catalog source fails
pub async fn fetch_tracks(
    source: &dyn CatalogSource,
    resolver: &dyn AssetResolver,
) -> motify_core::Result<Vec<Track>> {
    let records = source.fetch_all_tracks().await?;
    tracing::debug!(count = records.len(), "Fetched catalog records");

    let mut tracks = Vec::with_capacity(records.len());
    for record in records {
        match track_from_record(&record, resolver).await {
            Ok(track) => tracks.push(track),
            Err(e) => {
                tracing::warn!(track_id = %record.id, error = %e, "Skipping unresolvable track");
            }
        }
    }
    Ok(tracks)
}

/// Convert one remote record, resolving its audio and artwork references
///
/// # Errors
///
/// Returns an error if either reference cannot be resolved
pub async fn track_from_record(
    record: &RemoteTrackRecord,
    resolver: &dyn AssetResolver,
) -> motify_core::Result<Track> {
    let audio = resolver.resolve(&record.audio).await?;
    let artwork = resolver.resolve(&record.artwork).await?;
    let duration = record
        .duration
        .map_or(MediaTime::ZERO, MediaTime::from_seconds);

    Ok(Track::new(
        TrackId::new(record.id.clone()),
        record.title.clone(),
        record.genre.clone(),
        audio,
        artwork,
        record.description.clone(),
        duration,
    ))
}

fn same_list(a: &[Track], b: &[Track]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_contents(y))
}
