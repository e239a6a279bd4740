// ABOUTME: Integration tests for the deployment value registry and environment settings
// ABOUTME: Exercises env loading, key assignment, and type-erased override round trips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use runtimeconfig::{
    DeploymentValues, OrganizationId, OverrideStoreBackend, RequestContext, StoreKind,
    StoreSettings,
};
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_environment_overrides_defaults() {
    let values = DeploymentValues::load(lookup_from(&[
        ("NOTIFICATIONS_EMAIL_SMARTHOST", "smtp.example.com:2525"),
        ("NOTIFICATIONS_WEBHOOK_TIMEOUT", "1m30s"),
        ("EXPERIMENTS", "pestle,mortar"),
    ]))
    .unwrap();

    assert_eq!(
        values.notifications_email_smarthost.startup_value().host,
        "smtp.example.com"
    );
    assert_eq!(
        *values.notifications_webhook_timeout.startup_value(),
        Duration::from_secs(90)
    );
    assert_eq!(
        values.experiments,
        vec!["pestle".to_owned(), "mortar".to_owned()]
    );
    assert_eq!(
        values.notifications_email_smarthost.key(),
        "NOTIFICATIONS_EMAIL_SMARTHOST"
    );
}

#[test]
fn test_malformed_environment_names_the_option() {
    let err = DeploymentValues::load(lookup_from(&[(
        "NOTIFICATIONS_EMAIL_FORCE_TLS",
        "sometimes",
    )]))
    .unwrap_err();
    assert!(err.is_invalid_value());
    assert!(err.to_string().contains("Force TLS"));
}

#[tokio::test]
async fn test_runtime_field_round_trip_per_org() {
    let values = DeploymentValues::load(lookup_from(&[])).unwrap();
    let store = common::memory_store();
    let ctx = RequestContext::background();
    let (resolver, mutator) = common::org_pair(OrganizationId::new(), &store);
    let (other_resolver, _) = common::org_pair(OrganizationId::new(), &store);

    let field = values.runtime_field("oidc_auth_url_params").unwrap();
    assert_eq!(field.startup_string(), r#"{"access_type":"offline"}"#);

    field
        .set_from_str(&ctx, &mutator, r#"{"prompt":"consent","access_type":"online"}"#)
        .await
        .unwrap();
    assert_eq!(
        field.resolve_string(&ctx, &resolver).await.unwrap(),
        r#"{"access_type":"online","prompt":"consent"}"#
    );
    assert_eq!(
        field.coalesce_string(&ctx, &other_resolver).await.unwrap(),
        field.startup_string()
    );

    field.unset(&ctx, &mutator).await.unwrap();
    assert!(field
        .resolve_string(&ctx, &resolver)
        .await
        .unwrap_err()
        .is_not_found());
}

#[test]
#[serial]
fn test_deployment_values_from_process_env() {
    env::set_var("NOTIFICATIONS_EMAIL_FROM", "noreply@example.com");
    let values = DeploymentValues::from_env().unwrap();
    env::remove_var("NOTIFICATIONS_EMAIL_FROM");

    assert_eq!(
        values.notifications_email_from.startup_value(),
        "noreply@example.com"
    );
}

#[tokio::test]
#[serial]
async fn test_store_settings_from_env() {
    env::remove_var("RUNTIME_CONFIG_STORE");
    env::remove_var("DATABASE_URL");
    let settings = StoreSettings::from_env().unwrap();
    assert_eq!(settings.kind, StoreKind::Sqlite);

    env::set_var("RUNTIME_CONFIG_STORE", "sqlite");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    let settings = StoreSettings::from_env().unwrap();
    env::remove_var("RUNTIME_CONFIG_STORE");
    env::remove_var("DATABASE_URL");

    assert_eq!(settings.kind, StoreKind::Sqlite);
    let backend = OverrideStoreBackend::from_settings(&settings).await.unwrap();
    assert_eq!(backend.backend_name(), "sqlite");

    env::set_var("RUNTIME_CONFIG_STORE", "etcd");
    let result = StoreSettings::from_env();
    env::remove_var("RUNTIME_CONFIG_STORE");
    assert!(result.is_err());
}
