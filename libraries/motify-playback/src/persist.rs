//! Persistence of playback state
//!
//! Maps controller events to the keys they touch and loads the persisted
//! state back at session start.

use crate::controller::{PlaybackController, RestoredState};
use crate::events::PlaybackEvent;
use motify_core::{KeyValueStore, RepeatOption, Track, TrackId};
use motify_storage::{keys, load};
use serde::de::DeserializeOwned;

/// Load the persisted playback state
///
/// Unreadable entries are logged and fall back to their defaults.
pub async fn load_state(store: &dyn KeyValueStore) -> RestoredState {
    RestoredState {
        favorites: load_or_default::<Vec<TrackId>>(store, keys::FAVORITES).await,
        repeat_option: load_or_default::<RepeatOption>(store, keys::REPEAT_OPTION).await,
        autoplay: load_or_default::<bool>(store, keys::AUTOPLAY).await,
        track_playing_id: load_or_default::<Option<TrackId>>(store, keys::TRACK_PLAYING_ID).await,
        tracks: load_or_default::<Vec<Track>>(store, keys::TRACKS).await,
    }
}

async fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match load::<T>(store, key).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring unreadable persisted value");
            T::default()
        }
    }
}

/// Values to write for the keys touched by `events`
///
/// Each key appears at most once, with the controller's current value.
///
/// # Errors
///
/// Returns an error if a value cannot be serialized
pub fn changed_values(
    controller: &PlaybackController,
    events: &[PlaybackEvent],
) -> motify_core::Result<Vec<(&'static str, serde_json::Value)>> {
    let touched = |pred: fn(&PlaybackEvent) -> bool| events.iter().any(pred);
    let mut values = Vec::new();

    if touched(|e| matches!(e, PlaybackEvent::FavoritesChanged { .. })) {
        values.push((keys::FAVORITES, serde_json::to_value(controller.favorites())?));
    }
    if touched(|e| matches!(e, PlaybackEvent::RepeatChanged { .. })) {
        values.push((keys::REPEAT_OPTION, serde_json::to_value(controller.repeat_option())?));
    }
    if touched(|e| matches!(e, PlaybackEvent::AutoplayChanged { .. })) {
        values.push((keys::AUTOPLAY, serde_json::to_value(controller.autoplay())?));
    }
    if touched(|e| matches!(e, PlaybackEvent::TrackChanged { .. })) {
        if let Some(id) = controller.current_track_id() {
            values.push((keys::TRACK_PLAYING_ID, serde_json::to_value(id)?));
        }
    }
    if touched(|e| matches!(e, PlaybackEvent::CatalogChanged { .. })) {
        values.push((keys::TRACKS, serde_json::to_value(controller.catalog().tracks())?));
    }
    Ok(values)
}

/// Write `values` to the store in order
///
/// # Errors
///
/// Returns the first store error; later keys are not written
pub async fn write_values(
    store: &dyn KeyValueStore,
    values: Vec<(&'static str, serde_json::Value)>,
) -> motify_core::Result<()> {
    for (key, value) in values {
        store.set(key, value).await?;
        tracing::trace!(key, "Persisted playback value");
    }
    Ok(())
}
