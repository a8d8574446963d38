/// Service traits for MotiFy
///
/// Every remote or persistent collaborator is reached through one of these
/// traits. Implementations are constructed once at startup and passed around
/// as `Arc<dyn Trait>`.
use crate::error::Result;
use crate::types::{Quote, RemoteTrackRecord};
use async_trait::async_trait;
use url::Url;

/// Simple settings/state store keyed by string
///
/// Values are JSON documents so callers can persist any `serde` type.
/// Typed helpers live in `motify-storage`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Remove the value stored under `key` (no-op when absent)
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Remote source of the track catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every track record
    ///
    /// # Errors
    /// Returns a network or decode error when the catalog cannot be retrieved
    async fn fetch_all_tracks(&self) -> Result<Vec<RemoteTrackRecord>>;
}

/// Turns remote asset references into playable/downloadable URLs
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Resolve a remote reference
    ///
    /// # Errors
    /// Returns `MotifyError::InvalidLocator` when the reference cannot be resolved
    async fn resolve(&self, reference: &str) -> Result<Url>;
}

/// Source of inspirational quotes
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch a fresh quote
    async fn fetch_quote(&self) -> Result<Quote>;
}
