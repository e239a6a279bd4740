// ABOUTME: In-memory override store for tests and single-process development
// ABOUTME: DashMap keyed by (namespace, key) with last-write-wins upserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{OverrideStore, StoredOverride};
use chrono::Utc;
use dashmap::DashMap;
use runtimeconfig_core::RuntimeConfigResult;
use std::sync::Arc;

type RowKey = (String, String);

/// In-memory override store
///
/// Clones share the same rows, so a resolver and a mutator built from clones of
/// one store observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOverrideStore {
    rows: Arc<DashMap<RowKey, StoredOverride>>,
}

impl InMemoryOverrideStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored overrides across all namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no overrides
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait::async_trait]
impl OverrideStore for InMemoryOverrideStore {
    async fn get(&self, namespace: &str, key: &str) -> RuntimeConfigResult<Option<String>> {
        let row_key = (namespace.to_owned(), key.to_owned());
        Ok(self.rows.get(&row_key).map(|row| row.value.clone()))
    }

    async fn upsert(&self, namespace: &str, key: &str, value: &str) -> RuntimeConfigResult<()> {
        let row = StoredOverride {
            namespace: namespace.to_owned(),
            key: key.to_owned(),
            value: value.to_owned(),
            updated_at: Utc::now(),
        };
        self.rows.insert((namespace.to_owned(), key.to_owned()), row);
        Ok(())
    }

    async fn delete(&self, namespace: &str, key: &str) -> RuntimeConfigResult<()> {
        self.rows.remove(&(namespace.to_owned(), key.to_owned()));
        Ok(())
    }

    async fn list(&self, namespace: &str) -> RuntimeConfigResult<Vec<StoredOverride>> {
        let mut rows: Vec<StoredOverride> = self
            .rows
            .iter()
            .filter(|row| row.key().0 == namespace)
            .map(|row| row.value().clone())
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_row_is_none() {
        let store = InMemoryOverrideStore::new();
        assert_eq!(store.get("deployment", "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_delete_is_idempotent() {
        let store = InMemoryOverrideStore::new();
        store.upsert("deployment", "k", "one").await.unwrap();
        store.upsert("deployment", "k", "two").await.unwrap();
        assert_eq!(
            store.get("deployment", "k").await.unwrap().as_deref(),
            Some("two")
        );
        assert_eq!(store.len(), 1);

        store.delete("deployment", "k").await.unwrap();
        store.delete("deployment", "k").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = InMemoryOverrideStore::new();
        store.upsert("org:a", "k", "a").await.unwrap();
        store.upsert("org:b", "k", "b").await.unwrap();
        store.upsert("org:a", "j", "a2").await.unwrap();

        let listed = store.list("org:a").await.unwrap();
        let keys: Vec<&str> = listed.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["j", "k"]);
        assert_eq!(store.get("org:b", "k").await.unwrap().as_deref(), Some("b"));
    }
}
