// ABOUTME: Structured configuration values carried as JSON text
// ABOUTME: Any serde type with a default becomes a configuration value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigValue;
use crate::errors::{RuntimeConfigError, RuntimeConfigResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Structured value encoded as compact JSON
///
/// Equality is that of `T`, so maps compare by content rather than by the
/// key order of their encoded form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json<T> {
    /// Decoded value
    pub value: T,
}

impl<T> Json<T> {
    /// Wrap a value
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Unwrap the decoded value
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> ConfigValue for Json<T>
where
    T: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    fn type_name() -> &'static str {
        "json"
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        serde_json::from_str(raw)
            .map(Self::new)
            .map_err(|e| RuntimeConfigError::invalid_value(Self::type_name(), raw, e))
    }

    fn encode(&self) -> String {
        // Only non-string map keys or a failing Serialize impl can end up here
        serde_json::to_string(&self.value).unwrap_or_else(|e| {
            warn!(error = %e, "json configuration value failed to encode");
            "null".to_owned()
        })
    }
}

impl<T> fmt::Display for Json<T>
where
    T: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
