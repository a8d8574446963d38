//! End-to-end wiring tests with in-process services

use async_trait::async_trait;
use motify_cli::{App, AppConfig, CliError};
use motify_core::{
    AssetResolver, CatalogSource, KeyValueStore, MotifyError, Quote, QuoteSource,
    RemoteTrackRecord,
};
use motify_storage::{keys, load, MemoryStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

struct FakeCatalog {
    records: Vec<RemoteTrackRecord>,
    fail: AtomicBool,
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_all_tracks(&self) -> motify_core::Result<Vec<RemoteTrackRecord>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MotifyError::network("offline"));
        }
        Ok(self.records.clone())
    }
}

struct PassthroughResolver;

#[async_trait]
impl AssetResolver for PassthroughResolver {
    async fn resolve(&self, reference: &str) -> motify_core::Result<Url> {
        Ok(Url::parse(reference)?)
    }
}

struct FixedQuote;

#[async_trait]
impl QuoteSource for FixedQuote {
    async fn fetch_quote(&self) -> motify_core::Result<Quote> {
        Ok(Quote::new("Start where you are.", "Arthur Ashe"))
    }
}

fn record(id: &str, title: &str) -> RemoteTrackRecord {
    RemoteTrackRecord {
        id: id.to_string(),
        title: title.to_string(),
        genre: "Ambient".to_string(),
        audio: format!("https://cdn.example.com/{id}.mp3"),
        artwork: format!("https://cdn.example.com/{id}.jpg"),
        description: String::new(),
        duration: Some(120.0),
    }
}

fn app() -> (App, Arc<MemoryStore>, Arc<FakeCatalog>) {
    let store = Arc::new(MemoryStore::new());
    let catalog = Arc::new(FakeCatalog {
        records: vec![record("b", "Beta"), record("a", "Alpha")],
        fail: AtomicBool::new(false),
    });
    let app = App::with_services(
        AppConfig::default(),
        store.clone(),
        catalog.clone(),
        Arc::new(PassthroughResolver),
        Arc::new(FixedQuote),
    );
    (app, store, catalog)
}

#[tokio::test]
async fn test_tracks_fetched_when_cache_empty() {
    let (app, store, _catalog) = app();
    let (session, task) = app.start_session().await;

    let tracks = app.tracks(&session, false).await.unwrap();
    let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);

    session.shutdown().await.unwrap();
    task.await.unwrap();

    let cached: Option<Vec<motify_core::Track>> = load(store.as_ref(), keys::TRACKS).await.unwrap();
    assert_eq!(cached.map(|t| t.len()), Some(2));
}

#[tokio::test]
async fn test_failed_refresh_uses_cache() {
    let (app, _store, catalog) = app();
    let (session, task) = app.start_session().await;
    app.tracks(&session, true).await.unwrap();

    catalog.fail.store(true, Ordering::SeqCst);
    let tracks = app.tracks(&session, true).await.unwrap();
    assert_eq!(tracks.len(), 2);

    session.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_failed_refresh_without_cache_errors() {
    let (app, _store, catalog) = app();
    catalog.fail.store(true, Ordering::SeqCst);
    let (session, task) = app.start_session().await;

    let result = app.tracks(&session, false).await;
    assert!(matches!(result, Err(CliError::Playback(_))));

    session.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_favorite_persists_across_sessions() {
    let (app, store, _catalog) = app();

    let (session, task) = app.start_session().await;
    let track = app.find_track(&session, "b").await.unwrap();
    session.set_favorite(true, track).await.unwrap();
    session.shutdown().await.unwrap();
    task.await.unwrap();

    let favorites: Option<Vec<String>> = load(store.as_ref(), keys::FAVORITES).await.unwrap();
    assert_eq!(favorites, Some(vec!["b".to_string()]));

    // Favorites sort first in a new session
    let (session, task) = app.start_session().await;
    let tracks = app.tracks(&session, false).await.unwrap();
    assert_eq!(tracks[0].title, "Beta");
    session.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_unknown_track_not_found() {
    let (app, _store, _catalog) = app();
    let (session, task) = app.start_session().await;

    let result = app.find_track(&session, "missing").await;
    assert!(matches!(result, Err(CliError::NotFound(_))));

    session.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_quote_and_activities_share_store() {
    let (app, store, _catalog) = app();

    let holder = app
        .daily_quote()
        .current(chrono::Local::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(holder.quote.author, "Arthur Ashe");
    assert!(store.get(keys::QUOTE).await.unwrap().is_some());

    let mut book = app.activities().await.unwrap();
    book.create().await.unwrap();
    assert_eq!(app.activities().await.unwrap().len(), 1);
}
