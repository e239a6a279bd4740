// ABOUTME: Main library entry point for layered runtime configuration
// ABOUTME: Typed entries resolved against scoped, pluggable override stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Runtime Config
//!
//! A deployment establishes its configuration at startup from defaults and the
//! environment. Selected fields can then be overridden at runtime, per organization,
//! without restarting the process.
//!
//! ## Features
//!
//! - **Typed entries**: `Entry<T>` keeps a field's startup value and override key
//! - **Strict failure modes**: "key not set" is a wiring bug, "entry not found" is normal
//! - **Composable scoping**: organization decorators narrow any resolver or mutator
//! - **Pluggable stores**: in-memory and `SQLite` adapters behind one trait
//! - **Cancellable I/O**: every store call honours a request context
//!
//! ## Architecture
//!
//! - **Entry**: typed field binding a startup value to an override identity
//! - **Resolver / Mutator**: read and write capabilities, composed by delegation
//! - **Scope**: composite namespace construction for tenant isolation
//! - **Store**: the namespaced key/value contract and its adapters
//! - **Options / Config**: startup binding and the deployment value registry
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use runtimeconfig::{
//!     Entry, InMemoryOverrideStore, OrgMutator, OrgResolver, RequestContext, StoreMutator,
//!     StoreResolver,
//! };
//! use runtimeconfig_core::{OrganizationId, RuntimeConfigResult};
//!
//! #[tokio::main]
//! async fn main() -> RuntimeConfigResult<()> {
//!     let store = InMemoryOverrideStore::new();
//!     let org = OrganizationId::new();
//!     let resolver = OrgResolver::new(org, StoreResolver::new(store.clone()));
//!     let mutator = OrgMutator::new(org, StoreMutator::new(store));
//!     let ctx = RequestContext::background();
//!
//!     let from: Entry<String> = Entry::must_new("NOTIFICATIONS_EMAIL_FROM", "system@example.com");
//!     from.set_runtime_value(&ctx, &mutator, &"ops@example.com".to_owned()).await?;
//!     println!("effective sender: {}", from.coalesce(&ctx, &resolver).await?);
//!     Ok(())
//! }
//! ```

/// Configuration registry and environment settings
pub mod config;
/// Request context with cancellation and deadlines
pub mod context;
/// Typed configuration entries
pub mod entry;
/// Structured logging setup
pub mod logging;
/// Write capability and its decorators
pub mod mutator;
/// Startup option binding
pub mod options;
/// Read capability and its decorators
pub mod resolver;
/// Scopes and composite keys
pub mod scope;
/// Override store contract and adapters
pub mod store;

pub use config::{DeploymentValues, RuntimeField, StoreKind, StoreSettings};
pub use context::{CancellationToken, RequestContext};
pub use entry::Entry;
pub use mutator::{DeploymentMutator, Mutator, NoopMutator, OrgMutator, ScopedMutator, StoreMutator};
pub use options::{DeploymentOption, OptionSet, OptionSummary};
pub use resolver::{
    DeploymentResolver, NoopResolver, OrgResolver, Resolver, ScopedResolver, StoreResolver,
};
pub use scope::{Scope, ScopedKey, DEPLOYMENT_NAMESPACE};
pub use store::{
    InMemoryOverrideStore, OverrideStore, OverrideStoreBackend, SqliteOverrideStore,
    StoredOverride,
};

pub use runtimeconfig_core::{
    ConfigValue, ErrorCode, HostPort, Json, OptionTarget, OrganizationId, RuntimeConfigError,
    RuntimeConfigResult, StringArray,
};
