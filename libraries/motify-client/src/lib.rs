//! MotiFy HTTP services
//!
//! Remote collaborators of the MotiFy app.
//!
//! # Features
//!
//! - **Catalog**: Fetch the track catalog as JSON records
//! - **Assets**: Resolve `gs://` storage references to download URLs
//! - **Quotes**: Quote of the day, cached per local day, plus widget entries
//! - **Artwork**: Download artwork through a bounded LRU cache
//!
//! # Example
//!
//! ```ignore
//! use motify_client::{HttpCatalogSource, ServiceConfig, UrlAssetResolver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::new("https://example.com/tracks.json");
//!     let catalog = HttpCatalogSource::new(&config)?;
//!     let resolver = UrlAssetResolver::new(&config)?;
//!
//!     for record in catalog.fetch().await? {
//!         println!("{} -> {}", record.title, resolver.resolve_reference(&record.audio)?);
//!     }
//!     Ok(())
//! }
//! ```

mod artwork;
mod catalog;
mod daily;
mod error;
mod http;
mod quote;
mod resolver;
mod types;

pub use artwork::{ArtworkCache, ArtworkData, ArtworkFetcher};
pub use catalog::HttpCatalogSource;
pub use daily::{DailyQuote, WidgetEntry};
pub use error::{ClientError, Result};
pub use quote::HttpQuoteSource;
pub use resolver::UrlAssetResolver;
pub use types::{ServiceConfig, DEFAULT_ARTWORK_CAPACITY, DEFAULT_ARTWORK_MAX_BYTES};
