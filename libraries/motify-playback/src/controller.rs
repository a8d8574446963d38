//! Playback controller - core orchestration
//!
//! Coordinates catalog, queue, history, favorites and the media engine, and
//! decides what plays next.

use crate::{
    autoplay,
    catalog::{Catalog, CatalogRefresh},
    engine::MediaEngine,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    favorites::Favorites,
    history::History,
    now_playing::{NowPlayingInfo, RemoteCommand},
    queue::Queue,
    types::{PlaybackConfig, PlaybackState},
};
use motify_core::{MediaTime, QueueElement, RepeatOption, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Persisted state used to hydrate a controller at session start
#[derive(Debug, Clone, Default)]
pub struct RestoredState {
    /// Favorite ids, most recent first
    pub favorites: Vec<TrackId>,
    /// Repeat option
    pub repeat_option: RepeatOption,
    /// Autoplay toggle
    pub autoplay: bool,
    /// Track that was playing when the last session ended
    pub track_playing_id: Option<TrackId>,
    /// Cached catalog
    pub tracks: Vec<Track>,
}

/// Single authority over the media engine
///
/// All operations are synchronous except seeking. Every state change queues a
/// [`PlaybackEvent`]; callers collect them with
/// [`drain_events`](Self::drain_events).
pub struct PlaybackController {
    config: PlaybackConfig,
    engine: Box<dyn MediaEngine>,

    catalog: Catalog,
    queue: Queue,
    history: History,
    favorites: Favorites,

    current_track_id: Option<TrackId>,
    current_track: Option<Track>,
    is_playing: bool,
    current_time: MediaTime,

    autoplay: bool,
    repeat_option: RepeatOption,

    rng: StdRng,

    // Event queue for front ends
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller with an empty catalog
    pub fn new(config: PlaybackConfig, engine: Box<dyn MediaEngine>) -> Self {
        Self {
            history: History::new(config.history_size),
            config,
            engine,
            catalog: Catalog::default(),
            queue: Queue::new(),
            favorites: Favorites::new(),
            current_track_id: None,
            current_track: None,
            is_playing: false,
            current_time: MediaTime::ZERO,
            autoplay: false,
            repeat_option: RepeatOption::default(),
            rng: StdRng::from_entropy(),
            pending_events: Vec::new(),
        }
    }

    /// Use a fixed seed for random autoplay picks
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Hydrate from persisted state
    ///
    /// Does not load anything into the engine and emits no events.
    pub fn restore(&mut self, state: RestoredState) {
        self.favorites = Favorites::from_ids(state.favorites);
        self.repeat_option = state.repeat_option;
        self.autoplay = state.autoplay;
        self.catalog = Catalog::new(state.tracks);
        self.current_track = state
            .track_playing_id
            .as_ref()
            .and_then(|id| self.catalog.get(id))
            .cloned();
        self.current_track_id = state.track_playing_id;

        tracing::debug!(
            favorites = self.favorites.len(),
            tracks = self.catalog.len(),
            autoplay = self.autoplay,
            repeat = %self.repeat_option,
            "Restored playback state"
        );
    }

    // ===== Playback Control =====

    /// Play a track
    ///
    /// Loads the track unless it is already the loaded item, then starts
    /// output and runs the autoplay check.
    pub fn play(&mut self, track: Track) -> Result<()> {
        self.ensure_loaded(&track)?;

        let previous_track_id = self.current_track_id.replace(track.id.clone());
        if previous_track_id.as_ref() != Some(&track.id) {
            tracing::info!(track_id = %track.id, title = %track.title, "Now playing");
            self.emit(PlaybackEvent::TrackChanged {
                track_id: track.id.clone(),
                previous_track_id,
            });
        }
        self.current_track = Some(track);

        self.engine.play();
        self.set_playing(true);
        self.run_autoplay_check();
        self.emit_now_playing();
        Ok(())
    }

    /// Play the current track again if one is known
    pub fn resume(&mut self) -> Result<()> {
        match self.current_track.clone() {
            Some(track) => self.play(track),
            None => {
                tracing::debug!(
                    track_id = ?self.current_track_id,
                    "Nothing to resume"
                );
                Ok(())
            }
        }
    }

    /// Pause playback
    ///
    /// Keeps the current track.
    pub fn pause(&mut self) {
        self.engine.pause();
        self.set_playing(false);
        self.emit_now_playing();
    }

    /// Skip to the queue head
    ///
    /// With an empty queue the position goes back to zero, playback pauses and
    /// [`PlaybackError::NoNextTrack`] is returned.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            self.engine.seek(MediaTime::ZERO);
            self.set_time(MediaTime::ZERO);
            self.engine.pause();
            self.set_playing(false);
            self.emit_now_playing();
            return Err(PlaybackError::NoNextTrack);
        }

        // Load first so a failed load leaves queue and history untouched
        if let Some(head) = self.queue.peek_front().map(|e| e.track.clone()) {
            self.ensure_loaded(&head)?;
        }

        if let Some(current) = self.current_track.clone() {
            if self.repeat_option == RepeatOption::RepeatAll {
                self.queue.push_back(QueueElement::new(current.clone()));
            }
            self.history.push(current);
            self.emit_history_changed();
        }

        let element = self.queue.pop_front().ok_or(PlaybackError::NoNextTrack)?;
        self.emit_queue_changed();
        self.play(element.track)
    }

    /// Go back
    ///
    /// Past the restart threshold the current track starts over. Otherwise the
    /// most recent history entry plays and the current track returns to the
    /// queue head.
    pub fn prev(&mut self) -> Result<()> {
        if self.current_time.to_duration() > self.config.restart_threshold {
            tracing::debug!(time = %self.current_time, "Restarting current track");
            self.engine.seek(MediaTime::ZERO);
            self.set_time(MediaTime::ZERO);
            return Ok(());
        }

        let previous = self
            .history
            .peek()
            .cloned()
            .ok_or(PlaybackError::NoPreviousTrack)?;
        self.ensure_loaded(&previous)?;
        self.history.pop();
        self.emit_history_changed();

        if let Some(current) = self.current_track.clone() {
            self.queue.push_front(QueueElement::new(current));
            self.emit_queue_changed();
        }

        self.play(previous)
    }

    /// Seek and wait for the engine to finish
    pub async fn skip_to(&mut self, time: MediaTime) -> Result<()> {
        if !self.engine.has_item() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.engine.seek_and_wait(time).await?;
        self.set_time(self.engine.position());
        self.emit_now_playing();
        Ok(())
    }

    // ===== Modes =====

    /// Flip autoplay
    ///
    /// Turning it on runs the autoplay check; turning it off drops every
    /// autoplay entry from the queue. Returns the new value.
    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay = !self.autoplay;
        self.emit(PlaybackEvent::AutoplayChanged {
            enabled: self.autoplay,
        });

        if self.autoplay {
            self.run_autoplay_check();
        } else if self.queue.retain(|e| !e.autoplay) > 0 {
            self.emit_queue_changed();
        }
        self.autoplay
    }

    /// Advance the repeat option. Returns the new value.
    pub fn next_repeat_option(&mut self) -> RepeatOption {
        self.repeat_option = self.repeat_option.next();
        self.emit(PlaybackEvent::RepeatChanged {
            option: self.repeat_option,
        });
        self.repeat_option
    }

    // ===== Queue Management =====

    /// Insert at the queue head
    pub fn add_to_start(&mut self, element: QueueElement) {
        self.queue.push_front(element);
        self.emit_queue_changed();
    }

    /// Insert at the queue tail
    pub fn add_to_end(&mut self, element: QueueElement) {
        self.queue.push_back(element);
        self.emit_queue_changed();
    }

    /// Move the entries at `from` before the entry currently at `to`
    pub fn move_element_in_queue(&mut self, from: &[usize], to: usize) -> Result<()> {
        self.queue.move_offsets(from, to)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Remove the entries at the given positions
    pub fn delete_from_queue(&mut self, indices: &[usize]) -> Result<Vec<QueueElement>> {
        let removed = self.queue.remove_at(indices)?;
        if !removed.is_empty() {
            self.emit_queue_changed();
        }
        Ok(removed)
    }

    /// Empty the queue
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    // ===== Favorites =====

    /// Mark or unmark a track as favorite
    pub fn set_favorite(&mut self, value: bool, track: &Track) {
        if self.favorites.set(&track.id, value) {
            self.emit(PlaybackEvent::FavoritesChanged {
                favorites: self.favorites.ids().to_vec(),
            });
        }
    }

    /// Whether the track is a favorite
    pub fn is_favorite(&self, track: &Track) -> bool {
        self.favorites.contains(&track.id)
    }

    // ===== Engine Callbacks =====

    /// Periodic position sample from the engine
    pub fn on_time_sample(&mut self, time: MediaTime) {
        self.set_time(time);
    }

    /// Sample the engine position, emitting only when it moved
    pub fn sample_engine(&mut self) {
        let position = self.engine.position();
        if position != self.current_time {
            self.set_time(position);
        }
    }

    /// The loaded item played to its end
    pub fn on_item_finished(&mut self) -> Result<()> {
        if self.repeat_option == RepeatOption::RepeatOne && self.current_track.is_some() {
            self.engine.seek(MediaTime::ZERO);
            self.set_time(MediaTime::ZERO);
            self.engine.play();
            self.set_playing(true);
            return Ok(());
        }

        match self.next() {
            Err(PlaybackError::NoNextTrack) => {
                tracing::debug!("Reached end of queue");
                Ok(())
            }
            other => other,
        }
    }

    /// Dispatch a command from the now-playing surface
    pub async fn handle_remote_command(&mut self, command: RemoteCommand) -> Result<()> {
        tracing::debug!(?command, "Remote command");
        match command {
            RemoteCommand::Play => self.resume(),
            RemoteCommand::Pause => {
                self.pause();
                Ok(())
            }
            RemoteCommand::TogglePlayPause => {
                if self.is_playing {
                    self.pause();
                    Ok(())
                } else {
                    self.resume()
                }
            }
            RemoteCommand::Next => self.next(),
            RemoteCommand::Previous => self.prev(),
            RemoteCommand::Seek(time) => self.skip_to(time).await,
        }
    }

    // ===== Catalog =====

    /// Replace the catalog when `tracks` is non-empty and different
    pub fn replace_catalog(&mut self, tracks: Vec<Track>) -> CatalogRefresh {
        let outcome = self.catalog.apply(tracks);
        if outcome == CatalogRefresh::Updated {
            tracing::info!(count = self.catalog.len(), "Catalog updated");
            if self.current_track.is_none() {
                self.current_track = self
                    .current_track_id
                    .as_ref()
                    .and_then(|id| self.catalog.get(id))
                    .cloned();
            }
            self.emit(PlaybackEvent::CatalogChanged {
                count: self.catalog.len(),
            });
        }
        outcome
    }

    /// Catalog sorted by title with favorites first, in favorites order
    pub fn display_order(&self) -> Vec<Track> {
        let mut tracks = self.catalog.tracks().to_vec();
        tracks.sort_by(|a, b| a.title.cmp(&b.title));
        tracks.sort_by_key(|t| self.favorites.position(&t.id).unwrap_or(usize::MAX));
        tracks
    }

    /// Metadata for the now-playing surface
    pub fn now_playing(&self) -> Option<NowPlayingInfo> {
        self.current_track
            .as_ref()
            .map(|track| NowPlayingInfo::new(track, self.current_time, self.is_playing))
    }

    // ===== State Queries =====

    /// Materialized snapshot
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            current_track_id: self.current_track_id.clone(),
            is_playing: self.is_playing,
            current_time: self.current_time,
            queue: self.queue.elements().to_vec(),
            history: self.history.get_all().into_iter().cloned().collect(),
            favorites: self.favorites.ids().to_vec(),
            autoplay: self.autoplay,
            repeat_option: self.repeat_option,
        }
    }

    /// Whether output is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Id of the current track
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current_track_id.as_ref()
    }

    /// Current track, when known
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Last sampled position
    pub fn current_time(&self) -> MediaTime {
        self.current_time
    }

    /// Pending entries, head first
    pub fn queue(&self) -> &[QueueElement] {
        self.queue.elements()
    }

    /// History, oldest first
    pub fn history(&self) -> Vec<&Track> {
        self.history.get_all()
    }

    /// Favorite ids, most recent first
    pub fn favorites(&self) -> &[TrackId] {
        self.favorites.ids()
    }

    /// Autoplay toggle
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Repeat option
    pub fn repeat_option(&self) -> RepeatOption {
        self.repeat_option
    }

    /// Track catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Media engine
    pub fn engine(&self) -> &dyn MediaEngine {
        self.engine.as_ref()
    }

    /// Media engine, mutable
    pub fn engine_mut(&mut self) -> &mut dyn MediaEngine {
        self.engine.as_mut()
    }

    // ===== Events =====

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Inject the next autoplay track when the queue is empty
    fn run_autoplay_check(&mut self) {
        if !self.autoplay || !self.queue.is_empty() {
            return;
        }
        let Some(playing) = self.current_track.as_ref() else {
            return;
        };

        if let Some(track) = autoplay::pick_next(
            self.catalog.tracks(),
            playing,
            &mut self.rng,
            self.config.autoplay_self_loop,
        ) {
            tracing::debug!(track_id = %track.id, "Autoplay queued track");
            self.queue.push_front(QueueElement::autoplay(track));
            self.emit_queue_changed();
        }
    }

    /// Load `track` unless it is already the loaded item
    ///
    /// On failure nothing but the playing flag changes, and that flag is
    /// synced with the engine.
    fn ensure_loaded(&mut self, track: &Track) -> Result<()> {
        if self.engine.has_item() && self.engine.loaded_track_id() == Some(&track.id) {
            return Ok(());
        }
        if let Err(e) = self.engine.load(track) {
            tracing::warn!(track_id = %track.id, error = %e, "Failed to load track");
            let engine_playing = self.engine.is_playing();
            self.set_playing(engine_playing);
            return Err(e);
        }
        self.current_time = MediaTime::ZERO;
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(PlaybackEvent::StateChanged {
                is_playing: playing,
            });
        }
    }

    fn set_time(&mut self, time: MediaTime) {
        self.current_time = time;
        self.emit(PlaybackEvent::TimeUpdated { time });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_history_changed(&mut self) {
        self.emit(PlaybackEvent::HistoryChanged {
            length: self.history.len(),
        });
    }

    fn emit_now_playing(&mut self) {
        if let Some(info) = self.now_playing() {
            self.emit(PlaybackEvent::NowPlaying(info));
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("current_track_id", &self.current_track_id)
            .field("is_playing", &self.is_playing)
            .field("current_time", &self.current_time)
            .field("queue", &self.queue.len())
            .field("history", &self.history.len())
            .field("autoplay", &self.autoplay)
            .field("repeat_option", &self.repeat_option)
            .finish_non_exhaustive()
    }
}
