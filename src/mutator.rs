// ABOUTME: Write capability for runtime overrides and its scope-decorating implementations
// ABOUTME: Store-backed, deployment passthrough, organization-scoped, and refusing no-op mutators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mutators
//!
//! The write-side mirror of [`crate::resolver`]. A resolver and a mutator built
//! from the same store and the same decorator chain address the same rows.

use crate::context::RequestContext;
use crate::scope::{Scope, ScopedKey};
use crate::store::OverrideStore;
use runtimeconfig_core::{OrganizationId, RuntimeConfigError, RuntimeConfigResult};
use std::sync::Arc;

/// Write capability for scoped overrides
#[async_trait::async_trait]
pub trait Mutator: Send + Sync {
    /// Insert or replace the encoded override for `key`
    ///
    /// # Errors
    ///
    /// Returns store failures, `Unsupported`, `Cancelled`, or `DeadlineExceeded`
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()>;

    /// Remove the override for `key`; removing an absent override succeeds
    ///
    /// # Errors
    ///
    /// Returns store failures, `Unsupported`, `Cancelled`, or `DeadlineExceeded`
    async fn delete_by_key(&self, ctx: &RequestContext, key: &ScopedKey)
        -> RuntimeConfigResult<()>;
}

#[async_trait::async_trait]
impl<M: Mutator + ?Sized> Mutator for &M {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        (**self).upsert_by_key(ctx, key, value).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        (**self).delete_by_key(ctx, key).await
    }
}

#[async_trait::async_trait]
impl<M: Mutator + ?Sized> Mutator for Arc<M> {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        (**self).upsert_by_key(ctx, key, value).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        (**self).delete_by_key(ctx, key).await
    }
}

#[async_trait::async_trait]
impl<M: Mutator + ?Sized> Mutator for Box<M> {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        (**self).upsert_by_key(ctx, key, value).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        (**self).delete_by_key(ctx, key).await
    }
}

/// Mutator writing straight to an override store
#[derive(Debug, Clone)]
pub struct StoreMutator<S> {
    store: S,
}

impl<S: OverrideStore> StoreMutator<S> {
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
impl<S: OverrideStore> Mutator for StoreMutator<S> {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        let namespace = key.namespace();
        ctx.run(self.store.upsert(&namespace, key.name(), value)).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        let namespace = key.namespace();
        ctx.run(self.store.delete(&namespace, key.name())).await
    }
}

/// Deployment-wide mutator; passes keys through unscoped
#[derive(Debug, Clone)]
pub struct DeploymentMutator<M> {
    inner: M,
}

impl<M: Mutator> DeploymentMutator<M> {
    /// Wrap an inner mutator
    #[must_use]
    pub const fn new(inner: M) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<M: Mutator> Mutator for DeploymentMutator<M> {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        self.inner.upsert_by_key(ctx, key, value).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        self.inner.delete_by_key(ctx, key).await
    }
}

/// Mutator narrowing every write to one organization
#[derive(Debug, Clone)]
pub struct OrgMutator<M> {
    org_id: OrganizationId,
    inner: M,
}

impl<M: Mutator> OrgMutator<M> {
    /// Scope `inner` to `org_id`
    #[must_use]
    pub const fn new(org_id: OrganizationId, inner: M) -> Self {
        Self { org_id, inner }
    }

    /// Organization this mutator is scoped to
    #[must_use]
    pub const fn org_id(&self) -> OrganizationId {
        self.org_id
    }
}

#[async_trait::async_trait]
impl<M: Mutator> Mutator for OrgMutator<M> {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        let scoped = key.within(Scope::organization(self.org_id));
        self.inner.upsert_by_key(ctx, &scoped, value).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        let scoped = key.within(Scope::organization(self.org_id));
        self.inner.delete_by_key(ctx, &scoped).await
    }
}

/// Mutator for a custom scope kind
#[derive(Debug, Clone)]
pub struct ScopedMutator<M> {
    scope: Scope,
    inner: M,
}

impl<M: Mutator> ScopedMutator<M> {
    /// Scope `inner` to `scope`
    #[must_use]
    pub const fn new(scope: Scope, inner: M) -> Self {
        Self { scope, inner }
    }
}

#[async_trait::async_trait]
impl<M: Mutator> Mutator for ScopedMutator<M> {
    async fn upsert_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
        value: &str,
    ) -> RuntimeConfigResult<()> {
        let scoped = key.within(self.scope.clone());
        self.inner.upsert_by_key(ctx, &scoped, value).await
    }

    async fn delete_by_key(
        &self,
        ctx: &RequestContext,
        key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        let scoped = key.within(self.scope.clone());
        self.inner.delete_by_key(ctx, &scoped).await
    }
}

/// Mutator with no backing store; every write is refused
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMutator;

const NOOP_BACKEND: &str = "noop mutator";

#[async_trait::async_trait]
impl Mutator for NoopMutator {
    async fn upsert_by_key(
        &self,
        _ctx: &RequestContext,
        _key: &ScopedKey,
        _value: &str,
    ) -> RuntimeConfigResult<()> {
        Err(RuntimeConfigError::Unsupported {
            operation: "upsert",
            backend: NOOP_BACKEND,
        })
    }

    async fn delete_by_key(
        &self,
        _ctx: &RequestContext,
        _key: &ScopedKey,
    ) -> RuntimeConfigResult<()> {
        Err(RuntimeConfigError::Unsupported {
            operation: "delete",
            backend: NOOP_BACKEND,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{OrgResolver, Resolver, StoreResolver};
    use crate::store::InMemoryOverrideStore;

    #[tokio::test]
    async fn test_org_mutator_and_resolver_address_the_same_row() {
        let store = InMemoryOverrideStore::new();
        let org = OrganizationId::new();
        let mutator = OrgMutator::new(org, StoreMutator::new(store.clone()));
        let resolver = OrgResolver::new(org, StoreResolver::new(store.clone()));
        let ctx = RequestContext::background();
        let key = ScopedKey::deployment("k");

        mutator.upsert_by_key(&ctx, &key, "v").await.unwrap();
        assert_eq!(
            resolver.resolve_by_key(&ctx, &key).await.unwrap().as_deref(),
            Some("v")
        );

        mutator.delete_by_key(&ctx, &key).await.unwrap();
        mutator.delete_by_key(&ctx, &key).await.unwrap();
        assert_eq!(resolver.resolve_by_key(&ctx, &key).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_deployment_mutator_writes_unscoped() {
        let store = InMemoryOverrideStore::new();
        let mutator = DeploymentMutator::new(StoreMutator::new(store.clone()));
        let ctx = RequestContext::background();
        mutator
            .upsert_by_key(&ctx, &ScopedKey::deployment("k"), "v")
            .await
            .unwrap();
        assert_eq!(
            store.get("deployment", "k").await.unwrap().as_deref(),
            Some("v")
        );
    }

    #[tokio::test]
    async fn test_noop_mutator_refuses_writes() {
        let ctx = RequestContext::background();
        let key = ScopedKey::deployment("k");
        let err = NoopMutator.upsert_by_key(&ctx, &key, "v").await.unwrap_err();
        assert!(matches!(
            err,
            RuntimeConfigError::Unsupported {
                operation: "upsert",
                ..
            }
        ));
        let err = NoopMutator.delete_by_key(&ctx, &key).await.unwrap_err();
        assert!(matches!(
            err,
            RuntimeConfigError::Unsupported {
                operation: "delete",
                ..
            }
        ));
    }
}
