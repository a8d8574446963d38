//! Quote-of-the-day HTTP source.

use crate::error::{ClientError, Result};
use crate::http::{build_client, parse_http_url, send};
use crate::types::ServiceConfig;
use async_trait::async_trait;
use motify_core::{Quote, QuoteSource};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Fetches quotes from a RapidAPI-style endpoint returning `{ "text", "author" }`.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    http: Client,
    url: Url,
    api_key: String,
    api_host: String,
}

impl HttpQuoteSource {
    /// Create a source for `config.quote_url`.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            http: build_client(config.timeout)?,
            url: parse_http_url(&config.quote_url)?,
            api_key: config.quote_api_key.clone(),
            api_host: config.quote_api_host.clone(),
        })
    }

    /// Fetch one quote.
    pub async fn fetch(&self) -> Result<Quote> {
        debug!(url = %self.url, host = %self.api_host, "Fetching quote");

        let request = self
            .http
            .get(self.url.clone())
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host);

        let quote: Quote = send(request)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse quote: {e}")))?;

        debug!(author = %quote.author, "Quote fetched");
        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch_quote(&self) -> motify_core::Result<Quote> {
        Ok(self.fetch().await?)
    }
}
