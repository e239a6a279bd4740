// ABOUTME: Typed configuration entry binding a startup value to a runtime override identity
// ABOUTME: Resolve, coalesce, set, and unset overrides through caller-supplied resolvers and mutators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration Entries
//!
//! An [`Entry`] owns one field's startup value and the key under which runtime
//! overrides for it are stored. It never owns a store connection: every
//! store-touching call takes the [`Resolver`] or [`Mutator`] to use, and the scope
//! of the override is decided entirely by which decorator chain the caller passes.
//!
//! ## Key lifecycle
//!
//! The key is assigned once by configuration bootstrap code, before request traffic
//! starts. Until then, [`Entry::resolve`], [`Entry::set_runtime_value`] and
//! [`Entry::unset_runtime_value`] fail with `KeyNotSet`, and so does
//! [`Entry::coalesce`]: an entry that was never wired for overrides is a bug, not an
//! absent override.
//!
//! ## Example
//!
//! ```rust,no_run
//! use runtimeconfig::{Entry, InMemoryOverrideStore, RequestContext, StoreMutator, StoreResolver};
//! use runtimeconfig_core::HostPort;
//!
//! # async fn demo() -> runtimeconfig_core::RuntimeConfigResult<()> {
//! let store = InMemoryOverrideStore::new();
//! let ctx = RequestContext::background();
//!
//! let mut smarthost: Entry<HostPort> = Entry::new("", "localhost:1234")?;
//! smarthost.set_key("MY_DEPLOYMENT_VALUE");
//!
//! smarthost
//!     .set_runtime_value(&ctx, &StoreMutator::new(store.clone()), &HostPort::new("12.34.56.78", "1234"))
//!     .await?;
//! let effective = smarthost.coalesce(&ctx, &StoreResolver::new(store)).await?;
//! assert_eq!(effective.to_string(), "12.34.56.78:1234");
//! # Ok(())
//! # }
//! ```

use crate::context::RequestContext;
use crate::mutator::Mutator;
use crate::resolver::Resolver;
use crate::scope::ScopedKey;
use runtimeconfig_core::{ConfigValue, RuntimeConfigError, RuntimeConfigResult};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Typed configuration field with an overridable runtime value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry<T> {
    key: String,
    startup: T,
}

impl<T: ConfigValue> Entry<T> {
    /// Create an entry whose startup value is parsed from `startup`
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `startup` does not parse into `T`
    pub fn new(key: impl Into<String>, startup: &str) -> RuntimeConfigResult<Self> {
        Ok(Self {
            key: key.into(),
            startup: T::parse_value(startup)?,
        })
    }

    /// Create an entry from a compile-time constant default
    ///
    /// Only for static initialization with literals known to be well formed.
    /// Request-time code must use [`Entry::new`].
    ///
    /// # Panics
    ///
    /// Panics if `startup` does not parse into `T`.
    #[must_use]
    #[track_caller]
    #[allow(clippy::panic)] // Fail-fast constructor for static defaults only
    pub fn must_new(key: impl Into<String>, startup: &str) -> Self {
        match Self::new(key, startup) {
            Ok(entry) => entry,
            Err(e) => panic!("invalid static configuration default: {e}"),
        }
    }

    /// Assign the override identity; the last assignment wins
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Override identity, empty when unset
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value established at startup
    #[must_use]
    pub const fn startup_value(&self) -> &T {
        &self.startup
    }

    /// Re-parse and replace the startup value
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if `raw` does not parse; the previous value is kept
    pub fn set_startup_value(&mut self, raw: &str) -> RuntimeConfigResult<()> {
        self.startup = T::parse_value(raw)?;
        Ok(())
    }

    fn scoped_key(&self) -> RuntimeConfigResult<ScopedKey> {
        if self.key.is_empty() {
            return Err(RuntimeConfigError::KeyNotSet);
        }
        Ok(ScopedKey::deployment(self.key.as_str()))
    }

    /// Fetch the runtime override through `resolver`
    ///
    /// # Errors
    ///
    /// - `KeyNotSet` if no key was assigned
    /// - `EntryNotFound` if no override exists in the resolver's scope
    /// - `InvalidValue` if the stored value does not parse into `T`
    /// - any store, cancellation, or deadline error from the resolver
    pub async fn resolve<R>(&self, ctx: &RequestContext, resolver: &R) -> RuntimeConfigResult<T>
    where
        R: Resolver + ?Sized,
    {
        let key = self.scoped_key()?;
        let Some(raw) = resolver.resolve_by_key(ctx, &key).await? else {
            debug!(key = %self.key, "no runtime override");
            return Err(RuntimeConfigError::EntryNotFound {
                key: self.key.clone(),
            });
        };
        debug!(key = %self.key, "runtime override resolved");
        T::parse_value(&raw)
    }

    /// Fetch the runtime override, falling back to the startup value when absent
    ///
    /// # Errors
    ///
    /// Every error from [`Entry::resolve`] except `EntryNotFound`
    pub async fn coalesce<R>(&self, ctx: &RequestContext, resolver: &R) -> RuntimeConfigResult<T>
    where
        R: Resolver + ?Sized,
    {
        match self.resolve(ctx, resolver).await {
            Err(RuntimeConfigError::EntryNotFound { .. }) => Ok(self.startup.clone()),
            other => other,
        }
    }

    /// Write `value` as the runtime override through `mutator`
    ///
    /// # Errors
    ///
    /// `KeyNotSet` if no key was assigned, or any error from the mutator
    pub async fn set_runtime_value<M>(
        &self,
        ctx: &RequestContext,
        mutator: &M,
        value: &T,
    ) -> RuntimeConfigResult<()>
    where
        M: Mutator + ?Sized,
    {
        let key = self.scoped_key()?;
        mutator.upsert_by_key(ctx, &key, &value.encode()).await?;
        debug!(key = %self.key, "runtime override written");
        Ok(())
    }

    /// Clear the runtime override through `mutator`; clearing an absent override succeeds
    ///
    /// # Errors
    ///
    /// `KeyNotSet` if no key was assigned, or any error from the mutator
    pub async fn unset_runtime_value<M>(
        &self,
        ctx: &RequestContext,
        mutator: &M,
    ) -> RuntimeConfigResult<()>
    where
        M: Mutator + ?Sized,
    {
        let key = self.scoped_key()?;
        mutator.delete_by_key(ctx, &key).await?;
        debug!(key = %self.key, "runtime override cleared");
        Ok(())
    }
}

// Bound as an option target, an entry only ever takes its startup value from the
// option; the key is left alone.
impl<T: ConfigValue> ConfigValue for Entry<T> {
    fn type_name() -> &'static str {
        T::type_name()
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        Self::new(String::new(), raw)
    }

    fn encode(&self) -> String {
        self.startup.encode()
    }

    fn assign_from(&mut self, raw: &str) -> RuntimeConfigResult<()> {
        self.set_startup_value(raw)
    }
}

impl<T: ConfigValue> fmt::Display for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.startup.encode())
    }
}

impl<T: ConfigValue> FromStr for Entry<T> {
    type Err = RuntimeConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_value(s)
    }
}
