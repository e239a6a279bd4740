// ABOUTME: Startup option binding that fills typed configuration fields from defaults and environment
// ABOUTME: Options borrow their targets mutably, so entries and plain values bind the same way
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Deployment Options
//!
//! A [`DeploymentOption`] names a configuration field, the environment variable that
//! can set it, and the default applied first. The option's target is any
//! [`OptionTarget`]; because [`crate::Entry`] implements the value codec, an entry is
//! bound exactly like a plain value and only its startup value is written.

use runtimeconfig_core::{OptionTarget, RuntimeConfigResult};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// One named startup option bound to a mutable target
pub struct DeploymentOption<'a> {
    /// Human readable option name
    pub name: &'static str,
    /// Help text
    pub description: &'static str,
    /// Environment variable consulted by [`OptionSet::parse_env`]; empty to skip
    pub env: &'static str,
    /// Default applied by [`OptionSet::set_defaults`]; empty keeps the type's zero value
    pub default: &'static str,
    /// Field receiving parsed values
    pub value: &'a mut dyn OptionTarget,
}

impl fmt::Debug for DeploymentOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentOption")
            .field("name", &self.name)
            .field("env", &self.env)
            .field("default", &self.default)
            .field("value", &self.value.render())
            .finish_non_exhaustive()
    }
}

/// Read-only view of an option for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSummary {
    /// Option name
    pub name: &'static str,
    /// Help text
    pub description: &'static str,
    /// Environment variable
    pub env: &'static str,
    /// Declared default
    pub default: &'static str,
    /// Value type name
    pub value_type: &'static str,
    /// Current value in canonical form
    pub value: String,
}

/// Ordered set of options applied together
#[derive(Debug, Default)]
pub struct OptionSet<'a> {
    options: Vec<DeploymentOption<'a>>,
}

impl<'a> OptionSet<'a> {
    /// Empty option set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Add an option
    pub fn push(&mut self, option: DeploymentOption<'a>) {
        self.options.push(option);
    }

    /// Number of options
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the set has no options
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Apply every non-empty default
    ///
    /// # Errors
    ///
    /// Returns `InvalidOption` naming the first option whose default does not parse
    pub fn set_defaults(&mut self) -> RuntimeConfigResult<()> {
        for option in &mut self.options {
            if option.default.is_empty() {
                continue;
            }
            option
                .value
                .assign(option.default)
                .map_err(|e| e.for_option(option.name))?;
        }
        Ok(())
    }

    /// Apply environment values found through `lookup`
    ///
    /// `lookup` receives the variable name; pass `|name| std::env::var(name).ok()` to
    /// read the process environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOption` naming the first option whose value does not parse
    pub fn parse_env<F>(&mut self, lookup: F) -> RuntimeConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for option in &mut self.options {
            if option.env.is_empty() {
                continue;
            }
            if let Some(raw) = lookup(option.env) {
                debug!(option = option.name, env = option.env, "applying environment value");
                option
                    .value
                    .assign(&raw)
                    .map_err(|e| e.for_option(option.name))?;
            }
        }
        Ok(())
    }

    /// Snapshot of every option and its current value
    #[must_use]
    pub fn summaries(&self) -> Vec<OptionSummary> {
        self.options
            .iter()
            .map(|option| OptionSummary {
                name: option.name,
                description: option.description,
                env: option.env,
                default: option.default,
                value_type: option.value.value_type(),
                value: option.value.render(),
            })
            .collect()
    }
}
