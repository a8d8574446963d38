//! `SQLite`-backed key-value store
//!
//! Values are stored as JSON text so any `serde` type fits.

use crate::error::StorageError;
use async_trait::async_trait;
use motify_core::{KeyValueStore, Result};
use sqlx::{Row, SqlitePool};

/// Durable key-value store on top of a `SQLite` pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap a migrated pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Every stored key, sorted
    pub async fn keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM key_value ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("key"))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StorageError::from(e).into())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let row = sqlx::query("SELECT value FROM key_value WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        match row {
            Some(row) => {
                let text: String = row.try_get("value").map_err(StorageError::from)?;
                let value = serde_json::from_str(&text)
                    .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let text = serde_json::to_string(&value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO key_value (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(text)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        tracing::trace!(key, "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM key_value WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
