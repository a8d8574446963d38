//! Configuration for the HTTP services.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default artwork cache capacity (entries)
pub const DEFAULT_ARTWORK_CAPACITY: usize = 50;

/// Default artwork cache budget (bytes)
pub const DEFAULT_ARTWORK_MAX_BYTES: usize = 1024 * 1024 * DEFAULT_ARTWORK_CAPACITY;

/// Endpoints and credentials for the remote services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Catalog endpoint returning a JSON array of track records
    pub catalog_url: String,

    /// Quote-of-the-day endpoint
    pub quote_url: String,

    /// API key sent as `X-RapidAPI-Key`
    pub quote_api_key: String,

    /// API host sent as `X-RapidAPI-Host`
    pub quote_api_host: String,

    /// Base URL for `gs://` storage references
    pub storage_base: String,

    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Create a config with the given catalog endpoint and defaults elsewhere.
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            catalog_url: String::new(),
            quote_url: String::new(),
            quote_api_key: String::new(),
            quote_api_host: String::new(),
            storage_base: "https://firebasestorage.googleapis.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
