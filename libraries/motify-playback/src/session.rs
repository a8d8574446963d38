//! Playback session
//!
//! Actor that owns the [`PlaybackController`]. Every mutation goes through
//! its command channel, so there is exactly one writer. After each command
//! the session persists the touched keys, then broadcasts the controller's
//! events and answers the caller.

use crate::{
    catalog::{self, CatalogRefresh},
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    now_playing::RemoteCommand,
    persist,
    types::PlaybackState,
};
use motify_core::{
    AssetResolver, CatalogSource, KeyValueStore, MediaTime, QueueElement, RepeatOption, Track,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

type Reply<T> = oneshot::Sender<Result<T>>;

enum Command {
    Play(Track, Reply<()>),
    Resume(Reply<()>),
    Pause(Reply<()>),
    Next(Reply<()>),
    Prev(Reply<()>),
    SkipTo(MediaTime, Reply<()>),
    ToggleAutoplay(Reply<bool>),
    NextRepeatOption(Reply<RepeatOption>),
    AddToStart(QueueElement, Reply<()>),
    AddToEnd(QueueElement, Reply<()>),
    MoveInQueue(Vec<usize>, usize, Reply<()>),
    DeleteFromQueue(Vec<usize>, Reply<Vec<QueueElement>>),
    ClearQueue(Reply<()>),
    SetFavorite(bool, Track, Reply<()>),
    Remote(RemoteCommand, Reply<()>),
    TimeSample(MediaTime),
    ItemFinished(Reply<()>),
    CatalogFetched(Vec<Track>, Reply<CatalogRefresh>),
    Snapshot(oneshot::Sender<PlaybackState>),
    DisplayOrder(oneshot::Sender<Vec<Track>>),
    Shutdown,
}

/// Running playback session
pub struct PlaybackSession {
    controller: PlaybackController,
    store: Arc<dyn KeyValueStore>,
    commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackSession {
    /// Hydrate `controller` from `store` and start the session task
    pub async fn start(
        mut controller: PlaybackController,
        store: Arc<dyn KeyValueStore>,
    ) -> (SessionHandle, JoinHandle<()>) {
        let restored = persist::load_state(store.as_ref()).await;
        controller.restore(restored);
        Self::spawn(controller, store)
    }

    /// Start the session task with an already prepared controller
    pub fn spawn(
        controller: PlaybackController,
        store: Arc<dyn KeyValueStore>,
    ) -> (SessionHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

        let session = Self {
            controller,
            store,
            commands: command_rx,
            events: event_tx.clone(),
        };
        let task = tokio::spawn(session.run());

        let handle = SessionHandle {
            commands: command_tx,
            events: event_tx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        tracing::debug!("Playback session started");

        let mut sampler = tokio::time::interval(self.controller.config().sample_interval);
        sampler.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command).await,
                },
                _ = sampler.tick() => {
                    if self.controller.is_playing() {
                        self.controller.sample_engine();
                        self.flush().await;
                    }
                }
            }
        }

        self.flush().await;
        tracing::debug!("Playback session stopped");
    }

    async fn handle(&mut self, command: Command) {
        let c = &mut self.controller;
        match command {
            Command::Play(track, reply) => {
                let result = c.play(track);
                self.finish(reply, result).await;
            }
            Command::Resume(reply) => {
                let result = c.resume();
                self.finish(reply, result).await;
            }
            Command::Pause(reply) => {
                c.pause();
                self.finish(reply, Ok(())).await;
            }
            Command::Next(reply) => {
                let result = c.next();
                self.finish(reply, result).await;
            }
            Command::Prev(reply) => {
                let result = c.prev();
                self.finish(reply, result).await;
            }
            Command::SkipTo(time, reply) => {
                let result = c.skip_to(time).await;
                self.finish(reply, result).await;
            }
            Command::ToggleAutoplay(reply) => {
                let enabled = c.toggle_autoplay();
                self.finish(reply, Ok(enabled)).await;
            }
            Command::NextRepeatOption(reply) => {
                let option = c.next_repeat_option();
                self.finish(reply, Ok(option)).await;
            }
            Command::AddToStart(element, reply) => {
                c.add_to_start(element);
                self.finish(reply, Ok(())).await;
            }
            Command::AddToEnd(element, reply) => {
                c.add_to_end(element);
                self.finish(reply, Ok(())).await;
            }
            Command::MoveInQueue(from, to, reply) => {
                let result = c.move_element_in_queue(&from, to);
                self.finish(reply, result).await;
            }
            Command::DeleteFromQueue(indices, reply) => {
                let result = c.delete_from_queue(&indices);
                self.finish(reply, result).await;
            }
            Command::ClearQueue(reply) => {
                c.clear_queue();
                self.finish(reply, Ok(())).await;
            }
            Command::SetFavorite(value, track, reply) => {
                c.set_favorite(value, &track);
                self.finish(reply, Ok(())).await;
            }
            Command::Remote(remote, reply) => {
                let result = c.handle_remote_command(remote).await;
                self.finish(reply, result).await;
            }
            Command::TimeSample(time) => {
                c.on_time_sample(time);
                self.flush().await;
            }
            Command::ItemFinished(reply) => {
                let result = c.on_item_finished();
                self.finish(reply, result).await;
            }
            Command::CatalogFetched(tracks, reply) => {
                let outcome = c.replace_catalog(tracks);
                self.finish(reply, Ok(outcome)).await;
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(c.snapshot());
            }
            Command::DisplayOrder(reply) => {
                let _ = reply.send(c.display_order());
            }
            Command::Shutdown => {}
        }
    }

    /// Persist and broadcast pending events, then answer the caller
    async fn finish<T>(&mut self, reply: Reply<T>, result: Result<T>) {
        if let Err(e) = &result {
            if e.is_navigation() {
                tracing::debug!(error = %e, "Navigation had no effect");
            } else {
                tracing::warn!(error = %e, "Playback command failed");
            }
        }
        self.flush().await;
        let _ = reply.send(result);
    }

    async fn flush(&mut self) {
        let events = self.controller.drain_events();
        if events.is_empty() {
            return;
        }

        match persist::changed_values(&self.controller, &events) {
            Ok(values) if !values.is_empty() => {
                if let Err(e) = persist::write_values(self.store.as_ref(), values).await {
                    tracing::warn!(error = %e, "Failed to persist playback state");
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to encode playback state"),
        }

        for event in events {
            if !event.is_time_update() {
                tracing::trace!(?event, "Playback event");
            }
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }
}

/// Cloneable handle to a running [`PlaybackSession`]
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl SessionHandle {
    /// Receive every event broadcast after this call
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Play a track
    pub async fn play(&self, track: Track) -> Result<()> {
        self.request(|reply| Command::Play(track, reply)).await?
    }

    /// Play the current track again
    pub async fn resume(&self) -> Result<()> {
        self.request(Command::Resume).await?
    }

    /// Pause playback
    pub async fn pause(&self) -> Result<()> {
        self.request(Command::Pause).await?
    }

    /// Skip to the queue head
    pub async fn next(&self) -> Result<()> {
        self.request(Command::Next).await?
    }

    /// Go back
    pub async fn prev(&self) -> Result<()> {
        self.request(Command::Prev).await?
    }

    /// Seek and wait for completion
    pub async fn skip_to(&self, time: MediaTime) -> Result<()> {
        self.request(|reply| Command::SkipTo(time, reply)).await?
    }

    /// Flip autoplay, returning the new value
    pub async fn toggle_autoplay(&self) -> Result<bool> {
        self.request(Command::ToggleAutoplay).await?
    }

    /// Advance the repeat option, returning the new value
    pub async fn next_repeat_option(&self) -> Result<RepeatOption> {
        self.request(Command::NextRepeatOption).await?
    }

    /// Insert at the queue head
    pub async fn add_to_start(&self, element: QueueElement) -> Result<()> {
        self.request(|reply| Command::AddToStart(element, reply))
            .await?
    }

    /// Insert at the queue tail
    pub async fn add_to_end(&self, element: QueueElement) -> Result<()> {
        self.request(|reply| Command::AddToEnd(element, reply))
            .await?
    }

    /// Move queue entries
    pub async fn move_element_in_queue(&self, from: Vec<usize>, to: usize) -> Result<()> {
        self.request(|reply| Command::MoveInQueue(from, to, reply))
            .await?
    }

    /// Remove queue entries
    pub async fn delete_from_queue(&self, indices: Vec<usize>) -> Result<Vec<QueueElement>> {
        self.request(|reply| Command::DeleteFromQueue(indices, reply))
            .await?
    }

    /// Empty the queue
    pub async fn clear_queue(&self) -> Result<()> {
        self.request(Command::ClearQueue).await?
    }

    /// Mark or unmark a favorite
    pub async fn set_favorite(&self, value: bool, track: Track) -> Result<()> {
        self.request(|reply| Command::SetFavorite(value, track, reply))
            .await?
    }

    /// Forward a now-playing surface command
    pub async fn remote_command(&self, command: RemoteCommand) -> Result<()> {
        self.request(|reply| Command::Remote(command, reply))
            .await?
    }

    /// Report an engine position sample
    pub async fn time_sample(&self, time: MediaTime) -> Result<()> {
        self.commands
            .send(Command::TimeSample(time))
            .await
            .map_err(|_| PlaybackError::SessionClosed)
    }

    /// Report that the loaded item finished
    pub async fn item_finished(&self) -> Result<()> {
        self.request(Command::ItemFinished).await?
    }

    /// Current state snapshot
    pub async fn snapshot(&self) -> Result<PlaybackState> {
        self.request(Command::Snapshot).await
    }

    /// Catalog in display order
    pub async fn display_order(&self) -> Result<Vec<Track>> {
        self.request(Command::DisplayOrder).await
    }

    /// Refresh the catalog in the background
    ///
    /// The fetch runs in its own task; its result is applied by the session.
    /// Await the returned handle to learn the outcome, or drop it.
    pub fn refresh_catalog(
        &self,
        source: Arc<dyn CatalogSource>,
        resolver: Arc<dyn AssetResolver>,
    ) -> JoinHandle<Result<CatalogRefresh>> {
        let handle = self.clone();
        tokio::spawn(async move {
            let tracks = match catalog::fetch_tracks(source.as_ref(), resolver.as_ref()).await {
                Ok(tracks) => tracks,
                Err(e) => {
                    tracing::warn!(error = %e, "Catalog refresh failed, keeping cached tracks");
                    return Err(PlaybackError::from(e));
                }
            };
            handle
                .request(|reply| Command::CatalogFetched(tracks, reply))
                .await?
        })
    }

    /// Stop the session after pending commands
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| PlaybackError::SessionClosed)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .await
            .map_err(|_| PlaybackError::SessionClosed)?;
        rx.await.map_err(|_| PlaybackError::SessionClosed)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.commands.is_closed())
            .finish()
    }
}
