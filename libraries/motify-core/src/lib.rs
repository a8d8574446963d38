//! MotiFy Core
//!
//! Platform-agnostic domain types, traits, and error handling shared by every
//! MotiFy crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `QueueElement`, `RepeatOption`, `Quote`, `Activity`, etc.
//! - **Service Traits**: `KeyValueStore`, `CatalogSource`, `AssetResolver`, `QuoteSource`
//! - **Error Handling**: Unified `MotifyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use motify_core::types::{MediaTime, QueueElement, RepeatOption, Track, TrackId};
//! use url::Url;
//!
//! let track = Track::new(
//!     TrackId::new("lofi-1"),
//!     "Midnight Study",
//!     "Lo-Fi",
//!     Url::parse("https://cdn.example.com/lofi-1.mp3").unwrap(),
//!     Url::parse("https://cdn.example.com/lofi-1.jpg").unwrap(),
//!     "Calm beats",
//!     MediaTime::from_seconds(180.0),
//! );
//!
//! let element = QueueElement::new(track.clone());
//! assert_eq!(element.track.id, track.id);
//! assert_eq!(RepeatOption::NoRepeat.next(), RepeatOption::RepeatAll);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error type and result alias
pub mod error;
pub mod offsets;
/// Service traits for stores and remote sources
pub mod traits;
/// Domain types
pub mod types;

pub use error::{MotifyError, Result};
pub use traits::{AssetResolver, CatalogSource, KeyValueStore, QuoteSource};

pub use types::{
    next_local_midnight, Activity, ClockFormat, MediaTime, QueueElement, QueueEntryId, Quote,
    QuoteHolder, RemoteTrackRecord, RepeatOption, Time, Track, TrackId,
};
