// ABOUTME: Override management commands for runtimeconfig-cli
// ABOUTME: Handles get, set, unset, and list against deployment or organization scope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, bail, Result};
use runtimeconfig::{
    DeploymentMutator, DeploymentResolver, DeploymentValues, Mutator, OrgMutator, OrgResolver,
    OrganizationId, OverrideStore, OverrideStoreBackend, RequestContext, Resolver, RuntimeField,
    Scope, ScopedKey, StoreMutator, StoreResolver,
};
use tracing::info;

fn field<'a>(values: &'a DeploymentValues, name: &str) -> Result<&'a dyn RuntimeField> {
    values
        .runtime_field(name)
        .ok_or_else(|| anyhow!("unknown or non-overridable field: {name}"))
}

fn resolver(store: &OverrideStoreBackend, org: Option<OrganizationId>) -> Box<dyn Resolver> {
    let base = StoreResolver::new(store.clone());
    match org {
        Some(org_id) => Box::new(OrgResolver::new(org_id, base)),
        None => Box::new(DeploymentResolver::new(base)),
    }
}

fn mutator(store: &OverrideStoreBackend, org: Option<OrganizationId>) -> Box<dyn Mutator> {
    let base = StoreMutator::new(store.clone());
    match org {
        Some(org_id) => Box::new(OrgMutator::new(org_id, base)),
        None => Box::new(DeploymentMutator::new(base)),
    }
}

fn ensure_persistent(store: &OverrideStoreBackend) -> Result<()> {
    if !store.is_persistent() {
        bail!(
            "the {} store does not outlive this command; set DATABASE_URL or --database-url to a SQLite file",
            store.backend_name()
        );
    }
    Ok(())
}

fn scope_label(org: Option<OrganizationId>) -> String {
    org.map_or_else(|| "deployment".to_owned(), |org_id| format!("org {org_id}"))
}

/// Show the override and the effective value
pub async fn get(
    values: &DeploymentValues,
    store: &OverrideStoreBackend,
    name: &str,
    org: Option<OrganizationId>,
) -> Result<()> {
    let field = field(values, name)?;
    let resolver = resolver(store, org);
    let ctx = RequestContext::background();

    let override_value = match field.resolve_string(&ctx, resolver.as_ref()).await {
        Ok(value) => value,
        Err(e) if e.is_not_found() => "<inherited>".to_owned(),
        Err(e) => return Err(e.into()),
    };
    let effective = field.coalesce_string(&ctx, resolver.as_ref()).await?;

    println!("key:       {}", field.key());
    println!("scope:     {}", scope_label(org));
    println!("startup:   {}", field.startup_string());
    println!("override:  {override_value}");
    println!("effective: {effective}");
    Ok(())
}

/// Write an override
pub async fn set(
    values: &DeploymentValues,
    store: &OverrideStoreBackend,
    name: &str,
    org: Option<OrganizationId>,
    raw: &str,
) -> Result<()> {
    ensure_persistent(store)?;
    let field = field(values, name)?;
    let mutator = mutator(store, org);
    let ctx = RequestContext::background();

    field.set_from_str(&ctx, mutator.as_ref(), raw).await?;
    info!(key = field.key(), scope = %scope_label(org), "Override written");
    Ok(())
}

/// Clear an override
pub async fn unset(
    values: &DeploymentValues,
    store: &OverrideStoreBackend,
    name: &str,
    org: Option<OrganizationId>,
) -> Result<()> {
    ensure_persistent(store)?;
    let field = field(values, name)?;
    let mutator = mutator(store, org);
    let ctx = RequestContext::background();

    field.unset(&ctx, mutator.as_ref()).await?;
    info!(key = field.key(), scope = %scope_label(org), "Override cleared");
    Ok(())
}

/// List stored overrides in one scope
pub async fn list(store: &OverrideStoreBackend, org: Option<OrganizationId>) -> Result<()> {
    let namespace = org.map_or_else(
        || ScopedKey::deployment("").namespace(),
        |org_id| {
            ScopedKey::deployment("")
                .within(Scope::organization(org_id))
                .namespace()
        },
    );

    let rows = store.list(&namespace).await?;
    if rows.is_empty() {
        println!("no overrides in {namespace}");
        return Ok(());
    }
    for row in rows {
        println!(
            "{:<38} {:<40} {}",
            row.key,
            row.value,
            row.updated_at.to_rfc3339()
        );
    }
    Ok(())
}
