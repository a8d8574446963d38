//! Service wiring shared by the CLI commands

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use motify_client::{DailyQuote, HttpCatalogSource, HttpQuoteSource, UrlAssetResolver};
use motify_core::{AssetResolver, CatalogSource, KeyValueStore, QuoteSource, Track, TrackId};
use motify_playback::{
    CatalogRefresh, HeadlessEngine, PlaybackController, PlaybackSession, SessionHandle,
};
use motify_storage::SqliteStore;
use motify_timer::ActivityBook;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Services constructed once at startup
pub struct App {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogSource>,
    resolver: Arc<dyn AssetResolver>,
    quotes: Arc<dyn QuoteSource>,
}

impl App {
    /// Open the database and build the HTTP services
    pub async fn init(config: AppConfig) -> Result<Self> {
        config.validate()?;

        ensure_database_dir(&config.storage.database_url).await?;
        let pool = motify_storage::create_pool(&config.storage.database_url).await?;
        motify_storage::run_migrations(&pool).await?;
        info!(url = %config.storage.database_url, "Database ready");

        let catalog = Arc::new(HttpCatalogSource::new(&config.services)?);
        let resolver = Arc::new(UrlAssetResolver::new(&config.services)?);
        let quotes = Arc::new(HttpQuoteSource::new(&config.services)?);

        Ok(Self::with_services(
            config,
            Arc::new(SqliteStore::new(pool)),
            catalog,
            resolver,
            quotes,
        ))
    }

    /// Assemble from already constructed services
    pub fn with_services(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogSource>,
        resolver: Arc<dyn AssetResolver>,
        quotes: Arc<dyn QuoteSource>,
    ) -> Self {
        Self {
            config,
            store,
            catalog,
            resolver,
            quotes,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn daily_quote(&self) -> DailyQuote {
        DailyQuote::new(Arc::clone(&self.quotes), Arc::clone(&self.store))
    }

    /// Start a playback session hydrated from the store
    pub async fn start_session(&self) -> (SessionHandle, JoinHandle<()>) {
        let controller = PlaybackController::new(
            self.config.playback.to_playback_config(),
            Box::new(HeadlessEngine::new()),
        );
        PlaybackSession::start(controller, Arc::clone(&self.store)).await
    }

    /// Catalog in display order, refreshed first when asked or when nothing is cached
    ///
    /// A failed refresh falls back to the cached catalog.
    pub async fn tracks(&self, session: &SessionHandle, refresh: bool) -> Result<Vec<Track>> {
        let cached = session.display_order().await?;
        if !refresh && !cached.is_empty() {
            return Ok(cached);
        }

        let handle = session.refresh_catalog(Arc::clone(&self.catalog), Arc::clone(&self.resolver));
        match handle.await? {
            Ok(CatalogRefresh::Updated) => debug!("Catalog updated"),
            Ok(CatalogRefresh::Unchanged) => debug!("Catalog unchanged"),
            Err(e) if !cached.is_empty() => {
                tracing::warn!(error = %e, "Using cached catalog");
                return Ok(cached);
            }
            Err(e) => return Err(e.into()),
        }
        Ok(session.display_order().await?)
    }

    /// Look a track up by id, refreshing the catalog if nothing is cached
    pub async fn find_track(&self, session: &SessionHandle, id: &str) -> Result<Track> {
        let id = TrackId::new(id);
        self.tracks(session, false)
            .await?
            .into_iter()
            .find(|track| track.id == id)
            .ok_or_else(|| CliError::NotFound(format!("track {id}")))
    }

    pub async fn activities(&self) -> Result<ActivityBook> {
        Ok(ActivityBook::load(Arc::clone(&self.store)).await?)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Create the parent directory of a file-backed SQLite URL
async fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}
