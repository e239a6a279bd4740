// ABOUTME: Process-wide registry of deployment values, some of them overridable per organization
// ABOUTME: Binds every field to its environment variable and exposes entries by name, type-erased
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Deployment Values
//!
//! [`DeploymentValues`] is built once during startup: defaults are applied, the
//! environment is parsed, and every overridable entry receives its key. It is then
//! shared by reference with request handlers, which read or write overrides through
//! [`RuntimeField`] without knowing each entry's value type.
//!
//! Entry keys are the environment variable names, the most stable identity a field has.

use crate::context::RequestContext;
use crate::entry::Entry;
use crate::mutator::Mutator;
use crate::options::{DeploymentOption, OptionSet};
use crate::resolver::Resolver;
use runtimeconfig_core::{ConfigValue, HostPort, Json, RuntimeConfigResult, StringArray};
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;
use tracing::info;

/// Field name of the notification sender address
pub const EMAIL_FROM: &str = "notifications_email_from";
/// Field name of the SMTP smarthost
pub const EMAIL_SMARTHOST: &str = "notifications_email_smarthost";
/// Field name of the forced TLS flag
pub const EMAIL_FORCE_TLS: &str = "notifications_email_force_tls";
/// Field name of the webhook delivery timeout
pub const WEBHOOK_TIMEOUT: &str = "notifications_webhook_timeout";
/// Field name of the extra OIDC authorization URL parameters
pub const OIDC_AUTH_URL_PARAMS: &str = "oidc_auth_url_params";

const EMAIL_FROM_ENV: &str = "NOTIFICATIONS_EMAIL_FROM";
const EMAIL_SMARTHOST_ENV: &str = "NOTIFICATIONS_EMAIL_SMARTHOST";
const EMAIL_FORCE_TLS_ENV: &str = "NOTIFICATIONS_EMAIL_FORCE_TLS";
const WEBHOOK_TIMEOUT_ENV: &str = "NOTIFICATIONS_WEBHOOK_TIMEOUT";
const OIDC_AUTH_URL_PARAMS_ENV: &str = "OIDC_AUTH_URL_PARAMS";
const EXPERIMENTS_ENV: &str = "EXPERIMENTS";

/// Extra query parameters appended to the OIDC authorization URL
pub type AuthUrlParams = Json<BTreeMap<String, String>>;

/// Type-erased view of an overridable entry
///
/// Values cross this boundary in their canonical string form. Writes are parsed
/// into the entry's type first, so a malformed value never reaches the store.
#[async_trait::async_trait]
pub trait RuntimeField: Send + Sync {
    /// Override identity
    fn key(&self) -> &str;

    /// Name of the entry's value type
    fn value_type(&self) -> &'static str;

    /// Startup value in canonical form
    fn startup_string(&self) -> String;

    /// Resolve the override and encode it
    ///
    /// # Errors
    ///
    /// Same as [`Entry::resolve`]
    async fn resolve_string(
        &self,
        ctx: &RequestContext,
        resolver: &dyn Resolver,
    ) -> RuntimeConfigResult<String>;

    /// Resolve the override, falling back to the startup value, and encode it
    ///
    /// # Errors
    ///
    /// Same as [`Entry::coalesce`]
    async fn coalesce_string(
        &self,
        ctx: &RequestContext,
        resolver: &dyn Resolver,
    ) -> RuntimeConfigResult<String>;

    /// Parse `raw` into the entry's type and write it as the override
    ///
    /// # Errors
    ///
    /// `InvalidValue` if `raw` does not parse, otherwise as [`Entry::set_runtime_value`]
    async fn set_from_str(
        &self,
        ctx: &RequestContext,
        mutator: &dyn Mutator,
        raw: &str,
    ) -> RuntimeConfigResult<()>;

    /// Clear the override
    ///
    /// # Errors
    ///
    /// Same as [`Entry::unset_runtime_value`]
    async fn unset(&self, ctx: &RequestContext, mutator: &dyn Mutator) -> RuntimeConfigResult<()>;
}

#[async_trait::async_trait]
impl<T: ConfigValue> RuntimeField for Entry<T> {
    fn key(&self) -> &str {
        Entry::key(self)
    }

    fn value_type(&self) -> &'static str {
        T::type_name()
    }

    fn startup_string(&self) -> String {
        self.startup_value().encode()
    }

    async fn resolve_string(
        &self,
        ctx: &RequestContext,
        resolver: &dyn Resolver,
    ) -> RuntimeConfigResult<String> {
        Ok(self.resolve(ctx, resolver).await?.encode())
    }

    async fn coalesce_string(
        &self,
        ctx: &RequestContext,
        resolver: &dyn Resolver,
    ) -> RuntimeConfigResult<String> {
        Ok(self.coalesce(ctx, resolver).await?.encode())
    }

    async fn set_from_str(
        &self,
        ctx: &RequestContext,
        mutator: &dyn Mutator,
        raw: &str,
    ) -> RuntimeConfigResult<()> {
        let value = T::parse_value(raw)?;
        self.set_runtime_value(ctx, mutator, &value).await
    }

    async fn unset(&self, ctx: &RequestContext, mutator: &dyn Mutator) -> RuntimeConfigResult<()> {
        self.unset_runtime_value(ctx, mutator).await
    }
}

/// Deployment-wide configuration registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentValues {
    /// Sender address for notification emails
    pub notifications_email_from: Entry<String>,
    /// SMTP relay used to deliver notification emails
    pub notifications_email_smarthost: Entry<HostPort>,
    /// Force TLS when talking to the smarthost
    pub notifications_email_force_tls: Entry<bool>,
    /// Timeout for webhook notification delivery
    pub notifications_webhook_timeout: Entry<Duration>,
    /// Extra OIDC authorization URL parameters
    pub oidc_auth_url_params: Entry<AuthUrlParams>,
    /// Enabled experiments; not overridable at runtime
    pub experiments: StringArray,
}

impl DeploymentValues {
    /// Build the registry from defaults and the process environment
    ///
    /// # Errors
    ///
    /// Returns `InvalidOption` naming the first variable that does not parse
    pub fn from_env() -> RuntimeConfigResult<Self> {
        Self::load(|name| env::var(name).ok())
    }

    /// Build the registry from defaults and variables found through `lookup`
    ///
    /// # Errors
    ///
    /// Returns `InvalidOption` naming the first default or variable that does not parse
    pub fn load<F>(lookup: F) -> RuntimeConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = Self::default();
        {
            let mut options = values.options();
            options.set_defaults()?;
            options.parse_env(lookup)?;
        }
        values.assign_keys();

        info!(
            fields = values.runtime_fields().len(),
            experiments = values.experiments.len(),
            "Deployment values loaded"
        );
        Ok(values)
    }

    /// Startup options bound to every field
    pub fn options(&mut self) -> OptionSet<'_> {
        let mut set = OptionSet::new();
        set.push(DeploymentOption {
            name: "Notifications: Email: From Address",
            description: "The sender's address to use.",
            env: EMAIL_FROM_ENV,
            default: "",
            value: &mut self.notifications_email_from,
        });
        set.push(DeploymentOption {
            name: "Notifications: Email: Smarthost",
            description: "The intermediary SMTP host through which emails are sent.",
            env: EMAIL_SMARTHOST_ENV,
            default: "localhost:587",
            value: &mut self.notifications_email_smarthost,
        });
        set.push(DeploymentOption {
            name: "Notifications: Email: Force TLS",
            description: "Force a TLS connection to the configured SMTP smarthost.",
            env: EMAIL_FORCE_TLS_ENV,
            default: "false",
            value: &mut self.notifications_email_force_tls,
        });
        set.push(DeploymentOption {
            name: "Notifications: Webhook: Timeout",
            description: "How long to wait for a webhook endpoint to respond.",
            env: WEBHOOK_TIMEOUT_ENV,
            default: "10s",
            value: &mut self.notifications_webhook_timeout,
        });
        set.push(DeploymentOption {
            name: "OIDC Auth URL Parameters",
            description: "OIDC auth URL parameters to pass to the upstream provider.",
            env: OIDC_AUTH_URL_PARAMS_ENV,
            default: r#"{"access_type":"offline"}"#,
            value: &mut self.oidc_auth_url_params,
        });
        set.push(DeploymentOption {
            name: "Experiments",
            description: "Enable one or more experiments.",
            env: EXPERIMENTS_ENV,
            default: "",
            value: &mut self.experiments,
        });
        set
    }

    /// Key every overridable entry by its environment variable name
    pub fn assign_keys(&mut self) {
        self.notifications_email_from.set_key(EMAIL_FROM_ENV);
        self.notifications_email_smarthost.set_key(EMAIL_SMARTHOST_ENV);
        self.notifications_email_force_tls.set_key(EMAIL_FORCE_TLS_ENV);
        self.notifications_webhook_timeout.set_key(WEBHOOK_TIMEOUT_ENV);
        self.oidc_auth_url_params.set_key(OIDC_AUTH_URL_PARAMS_ENV);
    }

    /// Every overridable field with its name, in declaration order
    #[must_use]
    pub fn runtime_fields(&self) -> Vec<(&'static str, &dyn RuntimeField)> {
        vec![
            (
                EMAIL_FROM,
                &self.notifications_email_from as &dyn RuntimeField,
            ),
            (
                EMAIL_SMARTHOST,
                &self.notifications_email_smarthost as &dyn RuntimeField,
            ),
            (
                EMAIL_FORCE_TLS,
                &self.notifications_email_force_tls as &dyn RuntimeField,
            ),
            (
                WEBHOOK_TIMEOUT,
                &self.notifications_webhook_timeout as &dyn RuntimeField,
            ),
            (
                OIDC_AUTH_URL_PARAMS,
                &self.oidc_auth_url_params as &dyn RuntimeField,
            ),
        ]
    }

    /// Look up an overridable field by name or by key
    #[must_use]
    pub fn runtime_field(&self, name: &str) -> Option<&dyn RuntimeField> {
        self.runtime_fields()
            .into_iter()
            .find(|(field, entry)| *field == name || entry.key() == name)
            .map(|(_, entry)| entry)
    }
}
