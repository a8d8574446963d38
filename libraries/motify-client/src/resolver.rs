//! Asset reference resolution.
//!
//! References are either plain http(s) URLs, used as-is, or `gs://bucket/path`
//! storage references rewritten to a download URL under the storage base:
//! `<base>/v0/b/<bucket>/o/<percent-encoded path>?alt=media`.

use crate::error::{ClientError, Result};
use crate::http::parse_http_url;
use crate::types::ServiceConfig;
use async_trait::async_trait;
use motify_core::AssetResolver;
use url::Url;

/// Resolves asset references to download URLs.
#[derive(Debug, Clone)]
pub struct UrlAssetResolver {
    storage_base: Url,
}

impl UrlAssetResolver {
    /// Create a resolver for `config.storage_base`.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            storage_base: parse_http_url(&config.storage_base)?,
        })
    }

    /// Resolve one reference.
    pub fn resolve_reference(&self, reference: &str) -> Result<Url> {
        let reference = reference.trim();

        if let Some(rest) = reference.strip_prefix("gs://") {
            return self.storage_url(rest);
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Url::parse(reference)
                .map_err(|e| ClientError::InvalidUrl(format!("{reference}: {e}")));
        }
        Err(ClientError::UnsupportedReference(reference.to_string()))
    }

    fn storage_url(&self, rest: &str) -> Result<Url> {
        let (bucket, path) = rest
            .split_once('/')
            .filter(|(bucket, path)| !bucket.is_empty() && !path.is_empty())
            .ok_or_else(|| ClientError::UnsupportedReference(format!("gs://{rest}")))?;

        let mut url = self.storage_base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.storage_base.to_string()))?
            .pop_if_empty()
            .extend(["v0", "b", bucket, "o", path]);
        url.set_query(Some("alt=media"));
        Ok(url)
    }
}

#[async_trait]
impl AssetResolver for UrlAssetResolver {
    async fn resolve(&self, reference: &str) -> motify_core::Result<Url> {
        Ok(self.resolve_reference(reference)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> UrlAssetResolver {
        UrlAssetResolver::new(&ServiceConfig::default()).unwrap()
    }

    #[test]
    fn http_urls_are_used_verbatim() {
        let url = resolver()
            .resolve_reference("https://cdn.example.com/a%20b.mp3")
            .unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/a%20b.mp3");
    }

    #[test]
    fn storage_reference_is_rewritten() {
        let url = resolver()
            .resolve_reference("gs://motify.appspot.com/tracks/Calm Song.mp3")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://firebasestorage.googleapis.com/v0/b/motify.appspot.com/o/tracks%2FCalm%20Song.mp3?alt=media"
        );
    }

    #[test]
    fn storage_base_with_path_is_kept() {
        let config = ServiceConfig {
            storage_base: "http://localhost:9199/storage/".to_string(),
            ..ServiceConfig::default()
        };
        let url = UrlAssetResolver::new(&config)
            .unwrap()
            .resolve_reference("gs://bucket/a.jpg")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9199/storage/v0/b/bucket/o/a.jpg?alt=media"
        );
    }

    #[test]
    fn malformed_references_are_rejected() {
        let resolver = resolver();
        assert!(resolver.resolve_reference("gs://bucket-only").is_err());
        assert!(resolver.resolve_reference("gs:///path").is_err());
        assert!(matches!(
            resolver.resolve_reference("ftp://host/file"),
            Err(ClientError::UnsupportedReference(_))
        ));
        assert!(resolver.resolve_reference("").is_err());
    }
}
