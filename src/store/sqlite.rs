// ABOUTME: SQLite override store adapter built on sqlx
// ABOUTME: One row per (namespace, key) with ON CONFLICT upserts and idempotent deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{OverrideStore, StoredOverride};
use chrono::{DateTime, Utc};
use runtimeconfig_core::{RuntimeConfigError, RuntimeConfigResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::fs;
use std::str::FromStr;
use tracing::{debug, info};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Whether the URL names a database that lives only inside its connection
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(DEFAULT_MAX_CONNECTIONS)
    }
}

/// Override store persisted in a `SQLite` table
#[derive(Debug, Clone)]
pub struct SqliteOverrideStore {
    pool: SqlitePool,
    persistent: bool,
}

impl SqliteOverrideStore {
    /// Wrap an existing pool; call [`Self::migrate`] before first use
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            persistent: true,
        }
    }

    /// Connect to `database_url`, creating the file if needed, and run migrations
    ///
    /// Missing parent directories are created. In-memory URLs get a single connection
    /// that is never reaped, since the database lives only as long as it does.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the connection or migration fails
    pub async fn connect(database_url: &str) -> RuntimeConfigResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RuntimeConfigError::store("connect", e))?
            .create_if_missing(true);
        let in_memory = is_in_memory(database_url);
        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .map_err(|e| RuntimeConfigError::store("connect", e))?;
                }
            }
        }
        let pool = pool_options(in_memory)
            .connect_with(options)
            .await
            .map_err(|e| RuntimeConfigError::store("connect", e))?;

        let store = Self {
            pool,
            persistent: !in_memory,
        };
        store.migrate().await?;
        Ok(store)
    }

    /// Whether overrides outlive this process
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Get a reference to the pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the overrides table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the DDL fails
    pub async fn migrate(&self) -> RuntimeConfigResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS runtime_config_overrides (
                namespace TEXT NOT NULL,
                config_key TEXT NOT NULL,
                config_value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (namespace, config_key)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RuntimeConfigError::store("migrate", e))?;

        info!("runtime_config_overrides table ready");
        Ok(())
    }

    fn row_to_override(row: &SqliteRow) -> RuntimeConfigResult<StoredOverride> {
        let updated_at: String = row
            .try_get("updated_at")
            .map_err(|e| RuntimeConfigError::store("decode", e))?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|e| RuntimeConfigError::store("decode", e))?
            .with_timezone(&Utc);

        Ok(StoredOverride {
            namespace: row
                .try_get("namespace")
                .map_err(|e| RuntimeConfigError::store("decode", e))?,
            key: row
                .try_get("config_key")
                .map_err(|e| RuntimeConfigError::store("decode", e))?,
            value: row
                .try_get("config_value")
                .map_err(|e| RuntimeConfigError::store("decode", e))?,
            updated_at,
        })
    }
}

#[async_trait::async_trait]
impl OverrideStore for SqliteOverrideStore {
    async fn get(&self, namespace: &str, key: &str) -> RuntimeConfigResult<Option<String>> {
        let row = sqlx::query(
            r"
            SELECT config_value
            FROM runtime_config_overrides
            WHERE namespace = ?1 AND config_key = ?2
            ",
        )
        .bind(namespace)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RuntimeConfigError::store("get", e))?;

        row.map(|r| r.try_get::<String, _>("config_value"))
            .transpose()
            .map_err(|e| RuntimeConfigError::store("get", e))
    }

    async fn upsert(&self, namespace: &str, key: &str, value: &str) -> RuntimeConfigResult<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO runtime_config_overrides (namespace, config_key, config_value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(namespace, config_key) DO UPDATE SET
                config_value = excluded.config_value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(namespace)
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| RuntimeConfigError::store("upsert", e))?;

        debug!(namespace, key, "override row upserted");
        Ok(())
    }

    async fn delete(&self, namespace: &str, key: &str) -> RuntimeConfigResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM runtime_config_overrides
            WHERE namespace = ?1 AND config_key = ?2
            ",
        )
        .bind(namespace)
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|e| RuntimeConfigError::store("delete", e))?;

        debug!(
            namespace,
            key,
            removed = result.rows_affected(),
            "override row deleted"
        );
        Ok(())
    }

    async fn list(&self, namespace: &str) -> RuntimeConfigResult<Vec<StoredOverride>> {
        let rows = sqlx::query(
            r"
            SELECT namespace, config_key, config_value, updated_at
            FROM runtime_config_overrides
            WHERE namespace = ?1
            ORDER BY config_key
            ",
        )
        .bind(namespace)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RuntimeConfigError::store("list", e))?;

        rows.iter().map(Self::row_to_override).collect()
    }
}
