// ABOUTME: Scope chain and composite key construction for override storage
// ABOUTME: Renders deterministic, escaped namespaces so tenants never share override rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Override Scopes
//!
//! A [`ScopedKey`] pairs an entry's logical key with the chain of scopes the
//! caller's resolver or mutator narrowed it to. Scope decorators push onto the chain
//! before delegating, so the outermost decorator contributes the coarsest scope.
//!
//! The store namespace is rendered from the chain:
//!
//! ```text
//! []                                  -> deployment
//! [Organization(7c9e…)]               -> org:7c9e…
//! [Organization(7c9e…), Named(team)]  -> org:7c9e…/team:platform
//! ```
//!
//! Kinds and identifiers are percent-escaped for `%`, `:` and `/`, so an identifier
//! can never smuggle extra segments into the namespace. A named scope of kind `org`
//! addresses the same rows as the organization scope with that identifier.

use runtimeconfig_core::OrganizationId;
use std::fmt;

/// Namespace used for rows that apply to the whole deployment
pub const DEPLOYMENT_NAMESPACE: &str = "deployment";

const ORGANIZATION_KIND: &str = "org";
const SEGMENT_SEPARATOR: char = '/';
const KIND_SEPARATOR: char = ':';

/// One level of override scoping
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Overrides owned by a single organization
    Organization(OrganizationId),
    /// Any finer scope, identified by a kind and an opaque identifier
    Named {
        /// Scope kind, for example `team`
        kind: String,
        /// Identifier within that kind
        id: String,
    },
}

impl Scope {
    /// Organization scope
    #[must_use]
    pub const fn organization(org_id: OrganizationId) -> Self {
        Self::Organization(org_id)
    }

    /// Custom named scope
    #[must_use]
    pub fn named(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Named {
            kind: kind.into(),
            id: id.into(),
        }
    }

    fn write_segment(&self, out: &mut String) {
        match self {
            Self::Organization(org_id) => {
                out.push_str(ORGANIZATION_KIND);
                out.push(KIND_SEPARATOR);
                out.push_str(&org_id.to_string());
            }
            Self::Named { kind, id } => {
                escape_into(kind, out);
                out.push(KIND_SEPARATOR);
                escape_into(id, out);
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segment = String::new();
        self.write_segment(&mut segment);
        f.write_str(&segment)
    }
}

fn escape_into(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            ':' => out.push_str("%3A"),
            _ => out.push(c),
        }
    }
}

/// Logical override key together with the scopes it was narrowed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedKey {
    scopes: Vec<Scope>,
    name: String,
}

impl ScopedKey {
    /// Deployment-wide key with no scoping applied
    #[must_use]
    pub fn deployment(name: impl Into<String>) -> Self {
        Self {
            scopes: Vec::new(),
            name: name.into(),
        }
    }

    /// Copy of this key narrowed to one more scope
    #[must_use]
    pub fn within(&self, scope: Scope) -> Self {
        let mut scopes = Vec::with_capacity(self.scopes.len() + 1);
        scopes.extend(self.scopes.iter().cloned());
        scopes.push(scope);
        Self {
            scopes,
            name: self.name.clone(),
        }
    }

    /// Logical key as set on the entry
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scopes from coarsest to finest
    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Store namespace for this key
    #[must_use]
    pub fn namespace(&self) -> String {
        if self.scopes.is_empty() {
            return DEPLOYMENT_NAMESPACE.to_owned();
        }
        let mut out = String::new();
        for (i, scope) in self.scopes.iter().enumerate() {
            if i > 0 {
                out.push(SEGMENT_SEPARATOR);
            }
            scope.write_segment(&mut out);
        }
        out
    }
}

impl fmt::Display for ScopedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.namespace(), self.name)
    }
}
