// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging and resolver/mutator pairs over fresh stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `runtimeconfig`

use runtimeconfig::{
    InMemoryOverrideStore, OrgMutator, OrgResolver, OrganizationId, OverrideStore,
    SqliteOverrideStore, StoreMutator, StoreResolver,
};
use std::env;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Resolver and mutator scoped to one organization over the same store
pub type OrgPair<S> = (OrgResolver<StoreResolver<S>>, OrgMutator<StoreMutator<S>>);

/// Org-scoped resolver/mutator pair over `store`
pub fn org_pair<S: Clone + OverrideStore>(
    org_id: OrganizationId,
    store: &S,
) -> OrgPair<S> {
    (
        OrgResolver::new(org_id, StoreResolver::new(store.clone())),
        OrgMutator::new(org_id, StoreMutator::new(store.clone())),
    )
}

/// Fresh in-memory store
pub fn memory_store() -> InMemoryOverrideStore {
    init_test_logging();
    InMemoryOverrideStore::new()
}

/// Fresh migrated `SQLite` store in memory
pub async fn sqlite_memory_store() -> SqliteOverrideStore {
    init_test_logging();
    SqliteOverrideStore::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite store")
}
