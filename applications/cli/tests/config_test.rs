//! Configuration loading tests

use motify_cli::{AppConfig, CliError};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.storage.database_url, "sqlite://./data/motify.db");
    assert_eq!(config.playback.history_size, 50);
    assert!(!config.playback.autoplay_self_loop);
    assert_eq!(
        config.services.storage_base,
        "https://firebasestorage.googleapis.com"
    );
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
[storage]
database_url = "sqlite://./motify-test.db"

[services]
catalog_url = "https://example.com/tracks.json"
quote_url = "https://quotes.example.com/random"
quote_api_key = "key"
quote_api_host = "quotes.example.com"
timeout = 5

[playback]
history_size = 10
autoplay_self_loop = true
"#,
    );

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.storage.database_url, "sqlite://./motify-test.db");
    assert_eq!(config.services.catalog_url, "https://example.com/tracks.json");
    assert_eq!(config.services.quote_api_host, "quotes.example.com");
    assert_eq!(config.services.timeout, Duration::from_secs(5));
    // Unset fields keep their defaults
    assert_eq!(
        config.services.storage_base,
        "https://firebasestorage.googleapis.com"
    );
    assert!(config.validate().is_ok());

    let playback = config.playback.to_playback_config();
    assert_eq!(playback.history_size, 10);
    assert!(playback.autoplay_self_loop);
    assert_eq!(playback.restart_threshold, Duration::from_secs(2));
}

#[test]
fn test_partial_file_uses_section_defaults() {
    let file = write_config(
        r#"
[services]
catalog_url = "https://example.com/tracks.json"
"#,
    );

    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.storage.database_url, "sqlite://./data/motify.db");
    assert_eq!(config.playback.history_size, 50);
}

#[test]
fn test_validation_requires_urls() {
    let mut config = AppConfig::default();
    assert!(matches!(config.validate(), Err(CliError::Config(_))));

    config.services.catalog_url = "https://example.com/tracks.json".to_string();
    assert!(matches!(config.validate(), Err(CliError::Config(_))));

    config.services.quote_url = "https://quotes.example.com".to_string();
    assert!(config.validate().is_ok());

    config.storage.database_url.clear();
    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}

#[test]
fn test_missing_file_is_an_error() {
    let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/motify.toml")));
    assert!(matches!(result, Err(CliError::Config(_))));
}
