//! MotiFy Storage
//!
//! Key-value persistence for MotiFy state: favorites, repeat option, autoplay,
//! the cached catalog, the quote of the day and timer activities.
//!
//! # Architecture
//!
//! - **`SqliteStore`**: durable store backed by a single `key_value` table
//! - **`MemoryStore`**: process-local store for tests and ephemeral sessions
//! - **Typed helpers**: [`load`] / [`save`] convert between `serde` types and
//!   the JSON documents the stores hold
//!
//! # Example
//!
//! ```rust,no_run
//! use motify_storage::{create_pool, keys, run_migrations, save, load, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://motify.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteStore::new(pool);
//! save(&store, keys::AUTOPLAY, &true).await?;
//! let autoplay: Option<bool> = load(&store, keys::AUTOPLAY).await?;
//! assert_eq!(autoplay, Some(true));
//! # Ok(())
//! # }
//! ```

mod error;
pub mod keys;
mod memory;
mod sqlite;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use motify_core::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup before handing the pool to [`SqliteStore`].
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> error::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://motify.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> error::Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Load and deserialize the value stored under `key`
///
/// # Errors
///
/// Returns an error if the store fails or the stored JSON does not match `T`
pub async fn load<T>(store: &dyn KeyValueStore, key: &str) -> motify_core::Result<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
///
/// # Errors
///
/// Returns an error if serialization or the store fails
pub async fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> motify_core::Result<()>
where
    T: Serialize + ?Sized,
{
    store.set(key, serde_json::to_value(value)?).await
}
