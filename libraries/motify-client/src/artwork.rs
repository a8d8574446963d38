//! Artwork download with LRU caching.

use crate::error::{ClientError, Result};
use crate::http::{build_client, send};
use lru::LruCache;
use motify_core::{Track, TrackId};
use reqwest::Client;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, trace};

/// Downloaded artwork image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkData {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl ArtworkData {
    /// Create new artwork data
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

struct CacheState {
    entries: LruCache<TrackId, Arc<ArtworkData>>,
    bytes: usize,
}

/// Bounded least-recently-used artwork cache keyed by track id.
///
/// Evicts by entry count and by total byte size.
pub struct ArtworkCache {
    state: Mutex<CacheState>,
    max_bytes: usize,
}

impl ArtworkCache {
    /// Create a cache holding at most `capacity` images and `max_bytes` bytes.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                bytes: 0,
            }),
            max_bytes,
        }
    }

    /// Look up artwork, marking it most recently used.
    pub fn get(&self, id: &TrackId) -> Option<Arc<ArtworkData>> {
        self.lock().entries.get(id).cloned()
    }

    /// Store artwork, evicting least recently used entries as needed.
    ///
    /// Images larger than the byte budget are not cached.
    pub fn put(&self, id: TrackId, artwork: Arc<ArtworkData>) {
        let size = artwork.data.len();
        if size > self.max_bytes {
            debug!(track_id = %id, size, "Artwork larger than cache budget, not caching");
            return;
        }

        let mut state = self.lock();
        if let Some(old) = state.entries.pop(&id) {
            state.bytes -= old.data.len();
        }
        while state.bytes + size > self.max_bytes {
            match state.entries.pop_lru() {
                Some((_, evicted)) => state.bytes -= evicted.data.len(),
                None => break,
            }
        }
        if let Some((evicted_id, evicted)) = state.entries.push(id, artwork) {
            trace!(track_id = %evicted_id, "Evicted artwork");
            state.bytes -= evicted.data.len();
        }
        state.bytes += size;
    }

    /// Remove one entry.
    pub fn remove(&self, id: &TrackId) {
        let mut state = self.lock();
        if let Some(old) = state.entries.pop(id) {
            state.bytes -= old.data.len();
        }
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total cached bytes.
    pub fn bytes(&self) -> usize {
        self.lock().bytes
    }

    /// Clear the cache
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.bytes = 0;
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // The state stays consistent even if a holder panicked
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for ArtworkCache {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_ARTWORK_CAPACITY,
            crate::types::DEFAULT_ARTWORK_MAX_BYTES,
        )
    }
}

impl std::fmt::Debug for ArtworkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtworkCache")
            .field("len", &self.len())
            .field("bytes", &self.bytes())
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

/// Downloads track artwork, filling an [`ArtworkCache`] on miss.
#[derive(Debug, Clone)]
pub struct ArtworkFetcher {
    http: Client,
    cache: Arc<ArtworkCache>,
}

impl ArtworkFetcher {
    /// Create a fetcher sharing `cache`.
    pub fn new(cache: Arc<ArtworkCache>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            cache,
        })
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<ArtworkCache> {
        &self.cache
    }

    /// Artwork for `track`, from the cache or downloaded.
    pub async fn get(&self, track: &Track) -> Result<Arc<ArtworkData>> {
        if let Some(cached) = self.cache.get(&track.id) {
            trace!(track_id = %track.id, "Artwork cache hit");
            return Ok(cached);
        }

        debug!(track_id = %track.id, url = %track.artwork, "Downloading artwork");
        let response = send(self.http.get(track.artwork.clone())).await?;
        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let data = response
            .bytes()
            .await
            .map_err(ClientError::Request)?
            .to_vec();

        let artwork = Arc::new(ArtworkData::new(data, mime_type));
        self.cache.put(track.id.clone(), Arc::clone(&artwork));
        Ok(artwork)
    }
}
