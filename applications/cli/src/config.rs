/// Application configuration
use crate::error::{CliError, Result};
use motify_client::ServiceConfig;
use motify_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "motify.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub services: ServiceConfig,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    #[serde(default)]
    pub autoplay_self_loop: bool,
}

impl PlaybackSettings {
    /// Controller configuration with these overrides applied
    pub fn to_playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            history_size: self.history_size,
            autoplay_self_loop: self.autoplay_self_loop,
            ..PlaybackConfig::default()
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` (or `motify.toml` when present), then applies
    /// `MOTIFY_`-prefixed environment variables. Sections and keys are
    /// separated by a double underscore, e.g. `MOTIFY_SERVICES__CATALOG_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MOTIFY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.is_empty() {
            return Err(CliError::Config(
                "Database URL is required (set MOTIFY_STORAGE__DATABASE_URL)".to_string(),
            ));
        }
        if self.services.catalog_url.is_empty() {
            return Err(CliError::Config(
                "Catalog URL is required (set MOTIFY_SERVICES__CATALOG_URL)".to_string(),
            ));
        }
        if self.services.quote_url.is_empty() {
            return Err(CliError::Config(
                "Quote URL is required (set MOTIFY_SERVICES__QUOTE_URL)".to_string(),
            ));
        }
        if self.services.storage_base.is_empty() {
            return Err(CliError::Config("Storage base URL cannot be empty".to_string()));
        }
        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/motify.db".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        history_size: default_history_size(),
        autoplay_self_loop: false,
    }
}

fn default_history_size() -> usize {
    PlaybackConfig::default().history_size
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            services: ServiceConfig::default(),
            playback: default_playback(),
        }
    }
}
