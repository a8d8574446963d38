//! Remote track catalog.

use crate::error::{ClientError, Result};
use crate::http::{build_client, parse_http_url, send};
use crate::types::ServiceConfig;
use async_trait::async_trait;
use motify_core::{CatalogSource, RemoteTrackRecord};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Catalog served as a JSON array of track records.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    http: Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for `config.catalog_url`.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            http: build_client(config.timeout)?,
            url: parse_http_url(&config.catalog_url)?,
        })
    }

    /// Fetch every record.
    pub async fn fetch(&self) -> Result<Vec<RemoteTrackRecord>> {
        debug!(url = %self.url, "Fetching catalog");

        let response = send(self.http.get(self.url.clone())).await?;
        let records: Vec<RemoteTrackRecord> = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse catalog: {e}")))?;

        debug!(count = records.len(), "Catalog fetched");
        Ok(records)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_all_tracks(&self) -> motify_core::Result<Vec<RemoteTrackRecord>> {
        Ok(self.fetch().await?)
    }
}
