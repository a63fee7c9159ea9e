use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::repository::{KeyValueStore, StorageError};

/// Partition of the `kv_entries` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// Entries that outlive the process.
    Local,
    /// Entries tied to one app run; cleared when storage is opened.
    Session,
}

impl StoreScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
        }
    }
}

#[derive(Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
    scope: StoreScope,
}

impl SqliteKeyValueStore {
    #[must_use]
    pub fn new(pool: SqlitePool, scope: StoreScope) -> Self {
        Self { pool, scope }
    }

    #[must_use]
    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    /// Delete every entry in this store's scope.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the delete fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_entries WHERE scope = ?1")
            .bind(self.scope.as_str())
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM kv_entries
            WHERE scope = ?1 AND key = ?2
            ",
        )
        .bind(self.scope.as_str())
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_entries (scope, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(scope, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(self.scope.as_str())
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_entries WHERE scope = ?1 AND key = ?2")
            .bind(self.scope.as_str())
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
