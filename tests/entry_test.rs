// ABOUTME: Integration tests for typed configuration entries bound to startup options
// ABOUTME: Covers option binding, key enforcement, org-scoped overrides, and structured values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use runtimeconfig::{
    DeploymentOption, Entry, HostPort, Json, NoopMutator, NoopResolver, OptionSet,
    OrganizationId, RequestContext, RuntimeConfigError, StringArray,
};
use std::collections::BTreeMap;
use std::panic;

#[test]
fn test_deployment_value_without_runtime_config() {
    let mut field = StringArray::new();
    {
        let mut set = OptionSet::new();
        set.push(DeploymentOption {
            name: "my deployment value",
            description: "a plain option with no runtime override support",
            env: "MY_DEPLOYMENT_VALUE",
            default: "pestle,mortar",
            value: &mut field,
        });
        set.set_defaults().unwrap();
    }
    assert_eq!(field, vec!["pestle".to_owned(), "mortar".to_owned()]);
}

#[tokio::test]
async fn test_deployment_value_with_runtime_config() {
    let store = common::memory_store();
    let (resolver, mutator) = common::org_pair(OrganizationId::new(), &store);
    let ctx = RequestContext::background();

    let mut field: Entry<HostPort> = Entry::default();
    let env = "MY_DEPLOYMENT_VALUE";
    {
        let mut set = OptionSet::new();
        set.push(DeploymentOption {
            name: "my deployment value",
            description: "an option wrapped in an entry",
            env,
            default: "localhost:1234",
            value: &mut field,
        });
        set.set_defaults().unwrap();
    }

    assert_eq!(field.startup_value().to_string(), "localhost:1234");

    let err = field.resolve(&ctx, &resolver).await.unwrap_err();
    assert!(matches!(err, RuntimeConfigError::KeyNotSet));

    field.set_key(env);

    let new_value = HostPort::new("12.34.56.78", "1234");
    field
        .set_runtime_value(&ctx, &mutator, &new_value)
        .await
        .unwrap();

    let resolved = field.resolve(&ctx, &resolver).await.unwrap();
    assert_eq!(resolved.to_string(), "12.34.56.78:1234");

    field.unset_runtime_value(&ctx, &mutator).await.unwrap();
    assert!(field
        .resolve(&ctx, &resolver)
        .await
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_must_new_rejects_malformed_default() {
    let result = panic::catch_unwind(|| Entry::<f64>::must_new("key", "hello"));
    assert!(result.is_err());

    let entry = Entry::<f64>::must_new("key", "91.1234");
    assert!((entry.startup_value() - 91.1234).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_zero_value_entry() {
    let mut field: Entry<bool> = Entry::default();
    assert_eq!(*field.startup_value(), bool::default());

    field.set_startup_value("true").unwrap();
    assert!(*field.startup_value());

    let ctx = RequestContext::background();
    let err = field.resolve(&ctx, &NoopResolver).await.unwrap_err();
    assert!(err.is_key_not_set());

    let err = field
        .set_runtime_value(&ctx, &NoopMutator, &true)
        .await
        .unwrap_err();
    assert!(err.is_key_not_set());
}

#[tokio::test]
async fn test_simple_org_override() {
    let store = common::memory_store();
    let (resolver, mutator) = common::org_pair(OrganizationId::new(), &store);
    let ctx = RequestContext::background();

    let base = "system@dev.coder.com";
    let override_value = "dogfood@dev.coder.com".to_owned();

    let field: Entry<String> = Entry::must_new("my-field", base);
    assert_eq!(field.startup_value(), base);
    assert_eq!(field.to_string(), base);

    let err = field.resolve(&ctx, &resolver).await.unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(field.coalesce(&ctx, &resolver).await.unwrap(), base);

    field
        .set_runtime_value(&ctx, &mutator, &override_value)
        .await
        .unwrap();
    assert_eq!(
        field.coalesce(&ctx, &resolver).await.unwrap(),
        override_value
    );
}

#[tokio::test]
async fn test_complex_org_override() {
    let store = common::memory_store();
    let (resolver, mutator) = common::org_pair(OrganizationId::new(), &store);
    let ctx = RequestContext::background();

    let base = Json::new(BTreeMap::from([(
        "access_type".to_owned(),
        "offline".to_owned(),
    )]));
    let override_value = Json::new(BTreeMap::from([
        ("a".to_owned(), "b".to_owned()),
        ("c".to_owned(), "d".to_owned()),
    ]));

    let field: Entry<Json<BTreeMap<String, String>>> =
        Entry::must_new("my-field", &base.to_string());
    assert_eq!(field.startup_value(), &base);

    let err = field.resolve(&ctx, &resolver).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(field.coalesce(&ctx, &resolver).await.unwrap().value, base.value);

    field
        .set_runtime_value(&ctx, &mutator, &override_value)
        .await
        .unwrap();
    let resolved = field.resolve(&ctx, &resolver).await.unwrap();
    assert_eq!(resolved.value, override_value.value);
}

#[tokio::test]
async fn test_coalesce_propagates_key_not_set() {
    let store = common::memory_store();
    let (resolver, _) = common::org_pair(OrganizationId::new(), &store);
    let ctx = RequestContext::background();

    let field: Entry<String> = Entry::must_new("", "fallback");
    let err = field.coalesce(&ctx, &resolver).await.unwrap_err();
    assert!(err.is_key_not_set());
}
