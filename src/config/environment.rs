// ABOUTME: Environment configuration for the override store backend
// ABOUTME: Reads RUNTIME_CONFIG_STORE and DATABASE_URL with development defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for the override store

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Environment variable selecting the store backend
pub const STORE_BACKEND_ENV: &str = "RUNTIME_CONFIG_STORE";
/// Environment variable holding the `SQLite` connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Connection string used when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/runtime_config.db";

/// Override store backend kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process-local map; overrides vanish when the process exits
    Memory,
    /// `SQLite` table
    #[default]
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(anyhow!(
                "unknown override store backend {other:?} (expected memory or sqlite)"
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Override store settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSettings {
    /// Backend to construct
    pub kind: StoreKind,
    /// `SQLite` connection string, ignored by the memory backend
    pub database_url: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

impl StoreSettings {
    /// Load store settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `RUNTIME_CONFIG_STORE` names an unknown backend
    pub fn from_env() -> Result<Self> {
        let kind = match env::var(STORE_BACKEND_ENV) {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid {STORE_BACKEND_ENV}"))?,
            Err(_) => StoreKind::default(),
        };
        let database_url =
            env::var(DATABASE_URL_ENV).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        info!(backend = %kind, "Loaded override store settings");
        Ok(Self { kind, database_url })
    }

    /// Override the backend with a `SQLite` database at `database_url`
    #[must_use]
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.kind = StoreKind::Sqlite;
        self.database_url = database_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_parsing() {
        assert_eq!("memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert_eq!(" SQLite ".parse::<StoreKind>().unwrap(), StoreKind::Sqlite);
        assert!("postgres".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_default_backend_persists() {
        let settings = StoreSettings::default();
        assert_eq!(settings.kind, StoreKind::Sqlite);
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_database_url_implies_sqlite() {
        let settings = StoreSettings::default().with_database_url("sqlite::memory:");
        assert_eq!(settings.kind, StoreKind::Sqlite);
        assert_eq!(settings.database_url, "sqlite::memory:");
    }
}
