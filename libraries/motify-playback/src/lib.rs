//! MotiFy - Playback Management
//!
//! Platform-agnostic playback state machine for MotiFy.
//!
//! This crate provides:
//! - Track catalog with change detection on refresh
//! - Queue with per-entry identity (duplicates allowed)
//! - Bounded playback history for "previous"
//! - Favorites, repeat options and autoplay
//! - A media engine trait plus a headless engine
//! - A session actor that persists state and broadcasts events
//!
//! # Architecture
//!
//! [`PlaybackController`] is synchronous and owns the media engine. It queues
//! [`PlaybackEvent`]s as state changes. [`PlaybackSession`] wraps it in a
//! tokio task so every mutation has one writer, writes the persisted keys
//! after each command and re-broadcasts the events.
//!
//! # Example: Controller
//!
//! ```rust
//! use motify_core::{MediaTime, QueueElement, Track, TrackId};
//! use motify_playback::{HeadlessEngine, PlaybackConfig, PlaybackController};
//! use url::Url;
//!
//! let track = |id: &str| {
//!     Track::new(
//!         TrackId::new(id),
//!         id,
//!         "Lo-fi",
//!         Url::parse(&format!("https://cdn.example.com/{id}.mp3")).unwrap(),
//!         Url::parse(&format!("https://cdn.example.com/{id}.jpg")).unwrap(),
//!         "",
//!         MediaTime::from_seconds(120.0),
//!     )
//! };
//!
//! let mut controller =
//!     PlaybackController::new(PlaybackConfig::default(), Box::new(HeadlessEngine::new()));
//!
//! controller.play(track("a")).unwrap();
//! controller.add_to_end(QueueElement::new(track("b")));
//! controller.next().unwrap();
//!
//! assert_eq!(controller.current_track_id().unwrap().as_str(), "b");
//! assert_eq!(controller.history().len(), 1);
//! ```
//!
//! # Example: Session
//!
//! ```rust,no_run
//! use motify_playback::{HeadlessEngine, PlaybackConfig, PlaybackController, PlaybackSession};
//! use motify_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> motify_playback::Result<()> {
//! let controller =
//!     PlaybackController::new(PlaybackConfig::default(), Box::new(HeadlessEngine::new()));
//! let (session, _task) = PlaybackSession::start(controller, Arc::new(MemoryStore::new())).await;
//!
//! let mut events = session.subscribe();
//! session.toggle_autoplay().await?;
//! let _event = events.recv().await;
//! # Ok(())
//! # }
//! ```

mod autoplay;
pub mod catalog;
mod controller;
mod engine;
mod error;
pub mod events;
mod favorites;
mod history;
pub mod now_playing;
pub mod persist;
mod queue;
mod session;
pub mod types;

// Public exports
pub use autoplay::pick_next as pick_autoplay_track;
pub use catalog::{Catalog, CatalogRefresh};
pub use controller::{PlaybackController, RestoredState};
pub use engine::{HeadlessEngine, MediaEngine};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use favorites::Favorites;
pub use history::History;
pub use now_playing::{timeline, NowPlayingInfo, RemoteCommand};
pub use queue::Queue;
pub use session::{PlaybackSession, SessionHandle};
pub use types::{PlaybackConfig, PlaybackState};
