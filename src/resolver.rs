// ABOUTME: Read capability for runtime overrides and its scope-decorating implementations
// ABOUTME: Store-backed, deployment passthrough, organization-scoped, and no-op resolvers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Resolvers
//!
//! A [`Resolver`] fetches the encoded override for a [`ScopedKey`]. Resolvers
//! compose by delegation: a [`StoreResolver`] talks to the override store, and
//! decorators such as [`OrgResolver`] narrow the key before handing it on.
//!
//! ```rust,no_run
//! use runtimeconfig::{InMemoryOverrideStore, OrgResolver, StoreResolver};
//! use runtimeconfig_core::OrganizationId;
//!
//! let store = InMemoryOverrideStore::new();
//! let resolver = OrgResolver::new(OrganizationId::new(), StoreResolver::new(store));
//! # let _ = resolver;
//! ```

use crate::context::RequestContext;
use crate::scope::{Scope, ScopedKey};
use crate::store::OverrideStore;
use runtimeconfig_core::{OrganizationId, RuntimeConfigResult};
use std::sync::Arc;

/// Read capability for scoped overrides
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Fetch the encoded override for `key`
    ///
    /// `Ok(None)` means no override exists in this scope; it is not an error.
    ///
    /// # Errors
    ///
    /// Returns store failures, `Cancelled`, or `DeadlineExceeded`
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>>;
}

#[async_trait::async_trait]
impl<R: Resolver + ?Sized> Resolver for &R {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        (**self).resolve_by_key(ctx, key).await
    }
}

#[async_trait::async_trait]
impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        (**self).resolve_by_key(ctx, key).await
    }
}

#[async_trait::async_trait]
impl<R: Resolver + ?Sized> Resolver for Box<R> {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        (**self).resolve_by_key(ctx, key).await
    }
}

/// Resolver reading straight from an override store
#[derive(Debug, Clone)]
pub struct StoreResolver<S> {
    store: S,
}

impl<S: OverrideStore> StoreResolver<S> {
    /// Wrap a store
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait::async_trait]
impl<S: OverrideStore> Resolver for StoreResolver<S> {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        let namespace = key.namespace();
        ctx.run(self.store.get(&namespace, key.name())).await
    }
}

/// Deployment-wide resolver; passes keys through unscoped
#[derive(Debug, Clone)]
pub struct DeploymentResolver<R> {
    inner: R,
}

impl<R: Resolver> DeploymentResolver<R> {
    /// Wrap an inner resolver
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<R: Resolver> Resolver for DeploymentResolver<R> {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        self.inner.resolve_by_key(ctx, key).await
    }
}

/// Resolver narrowing every lookup to one organization
#[derive(Debug, Clone)]
pub struct OrgResolver<R> {
    org_id: OrganizationId,
    inner: R,
}

impl<R: Resolver> OrgResolver<R> {
    /// Scope `inner` to `org_id`
    #[must_use]
    pub const fn new(org_id: OrganizationId, inner: R) -> Self {
        Self { org_id, inner }
    }

    /// Organization this resolver is scoped to
    #[must_use]
    pub const fn org_id(&self) -> OrganizationId {
        self.org_id
    }
}

#[async_trait::async_trait]
impl<R: Resolver> Resolver for OrgResolver<R> {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        let scoped = key.within(Scope::organization(self.org_id));
        self.inner.resolve_by_key(ctx, &scoped).await
    }
}

/// Resolver for a custom scope kind, such as a team inside an organization
#[derive(Debug, Clone)]
pub struct ScopedResolver<R> {
    scope: Scope,
    inner: R,
}

impl<R: Resolver> ScopedResolver<R> {
    /// Scope `inner` to `scope`
    #[must_use]
    pub const fn new(scope: Scope, inner: R) -> Self {
        Self { scope, inner }
    }
}

#[async_trait::async_trait]
impl<R: Resolver> Resolver for ScopedResolver<R> {
    async fn resolve_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        let scoped = key.within(self.scope.clone());
        self.inner.resolve_by_key(ctx, &scoped).await
    }
}

/// Resolver that never finds an override
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

#[async_trait::async_trait]
impl Resolver for NoopResolver {
    async fn resolve_by_key(
        &self,
        _ctx: &RequestContext,
        _key: &ScopedKey,
    ) -> RuntimeConfigResult<Option<String>> {
        Ok(None)
    }
}
