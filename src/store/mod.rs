// ABOUTME: Override store abstraction consumed by store-backed resolvers and mutators
// ABOUTME: Pluggable backends (in-memory, SQLite) addressed by namespace and key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Override Store
//!
//! The store is an external collaborator: a namespaced string key/value service.
//! This module defines its contract and ships two adapters, an in-memory map for
//! tests and development and a `SQLite` table for persistent deployments.
//!
//! Absence is reported as `Ok(None)`, never as an error. Deleting an absent row
//! succeeds. Concurrent writers to the same `(namespace, key)` race; the last
//! write wins.

/// Backend selection from settings
pub mod factory;
/// In-memory store backed by a concurrent hash map
pub mod memory;
/// `SQLite` store backed by sqlx
pub mod sqlite;

pub use factory::OverrideStoreBackend;
pub use memory::InMemoryOverrideStore;
pub use sqlite::SqliteOverrideStore;

use chrono::{DateTime, Utc};
use runtimeconfig_core::RuntimeConfigResult;
use serde::{Deserialize, Serialize};

/// One stored override row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOverride {
    /// Namespace rendered from the scope chain
    pub namespace: String,
    /// Logical entry key
    pub key: String,
    /// Encoded value
    pub value: String,
    /// Time of the last upsert
    pub updated_at: DateTime<Utc>,
}

/// Namespaced key/value contract for override rows
#[async_trait::async_trait]
pub trait OverrideStore: Send + Sync {
    /// Fetch the encoded override, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the backend fails
    async fn get(&self, namespace: &str, key: &str) -> RuntimeConfigResult<Option<String>>;

    /// Insert or replace an override
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the backend fails
    async fn upsert(&self, namespace: &str, key: &str, value: &str) -> RuntimeConfigResult<()>;

    /// Remove an override; absent rows are not an error
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the backend fails
    async fn delete(&self, namespace: &str, key: &str) -> RuntimeConfigResult<()>;

    /// All overrides in a namespace, ordered by key
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::Store` if the backend fails
    async fn list(&self, namespace: &str) -> RuntimeConfigResult<Vec<StoredOverride>>;
}
