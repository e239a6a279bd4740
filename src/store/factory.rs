// ABOUTME: Override store factory for environment-based backend selection
// ABOUTME: Dispatches to the in-memory or SQLite adapter chosen by StoreSettings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{InMemoryOverrideStore, OverrideStore, SqliteOverrideStore, StoredOverride};
use crate::config::{StoreKind, StoreSettings};
use runtimeconfig_core::RuntimeConfigResult;
use tracing::info;

/// Unified override store interface
#[derive(Debug, Clone)]
pub enum OverrideStoreBackend {
    /// Process-local map; overrides vanish on restart
    Memory(InMemoryOverrideStore),
    /// Persistent `SQLite` table
    Sqlite(SqliteOverrideStore),
}

impl OverrideStoreBackend {
    /// Create the store selected by `settings`
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the `SQLite` database cannot be opened
    /// or migrated
    pub async fn from_settings(settings: &StoreSettings) -> RuntimeConfigResult<Self> {
        match settings.kind {
            StoreKind::Memory => {
                info!("Initializing in-memory override store");
                Ok(Self::Memory(InMemoryOverrideStore::new()))
            }
            StoreKind::Sqlite => {
                info!(
                    database_url = %settings.database_url,
                    "Initializing SQLite override store"
                );
                let store = SqliteOverrideStore::connect(&settings.database_url).await?;
                Ok(Self::Sqlite(store))
            }
        }
    }

    /// Backend name for diagnostics
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Whether overrides written here outlive this process
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        match self {
            Self::Memory(_) => false,
            Self::Sqlite(store) => store.is_persistent(),
        }
    }
}

#[async_trait::async_trait]
impl OverrideStore for OverrideStoreBackend {
    async fn get(&self, namespace: &str, key: &str) -> RuntimeConfigResult<Option<String>> {
        match self {
            Self::Memory(store) => store.get(namespace, key).await,
            Self::Sqlite(store) => store.get(namespace, key).await,
        }
    }

    async fn upsert(&self, namespace: &str, key: &str, value: &str) -> RuntimeConfigResult<()> {
        match self {
            Self::Memory(store) => store.upsert(namespace, key, value).await,
            Self::Sqlite(store) => store.upsert(namespace, key, value).await,
        }
    }

    async fn delete(&self, namespace: &str, key: &str) -> RuntimeConfigResult<()> {
        match self {
            Self::Memory(store) => store.delete(namespace, key).await,
            Self::Sqlite(store) => store.delete(namespace, key).await,
        }
    }

    async fn list(&self, namespace: &str) -> RuntimeConfigResult<Vec<StoredOverride>> {
        match self {
            Self::Memory(store) => store.list(namespace).await,
            Self::Sqlite(store) => store.list(namespace).await,
        }
    }
}
