// ABOUTME: Error types for runtime configuration resolution and mutation
// ABOUTME: Separates missing keys, missing overrides, parse failures, and store failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Runtime Configuration Errors
//!
//! A single error enum covers every failure the resolution protocol can surface.
//! The variants that matter most to callers are kept strictly apart:
//!
//! - [`RuntimeConfigError::KeyNotSet`]: the entry was never given an override identity.
//!   This is a wiring bug and is never defaulted away.
//! - [`RuntimeConfigError::EntryNotFound`]: no override exists for the key in the
//!   requested scope. This is the normal state, and `Entry::coalesce` absorbs it.
//! - [`RuntimeConfigError::InvalidValue`]: a supplied or stored string does not parse
//!   into the target type.
//! - [`RuntimeConfigError::Store`]: the override store failed; passed through untouched.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the runtime configuration crates
pub type RuntimeConfigResult<T> = Result<T, RuntimeConfigError>;

/// Boxed source error carried by store failures
pub type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Standard error codes for runtime configuration failures
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Override identity was never assigned
    #[serde(rename = "CONFIG_KEY_NOT_SET")]
    KeyNotSet = 6100,
    /// No override exists for the key in this scope
    #[serde(rename = "CONFIG_OVERRIDE_NOT_FOUND")]
    OverrideNotFound = 4000,
    /// Value failed to parse into the target type
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,
    /// Operation not supported by the supplied backend
    #[serde(rename = "UNSUPPORTED_OPERATION")]
    Unsupported = 6003,
    /// Override store failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Caller cancelled the request
    #[serde(rename = "REQUEST_CANCELLED")]
    Cancelled = 9100,
    /// Caller deadline elapsed
    #[serde(rename = "DEADLINE_EXCEEDED")]
    DeadlineExceeded = 9101,
}

impl ErrorCode {
    /// HTTP status an administrative surface should report for this code
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ConfigInvalid => 400,
            Self::OverrideNotFound => 404,
            Self::Cancelled => 503,
            Self::DeadlineExceeded => 504,
            Self::KeyNotSet | Self::Unsupported | Self::StorageError => 500,
        }
    }

    /// User-facing description of this code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::KeyNotSet => "Configuration field is not wired for runtime overrides",
            Self::OverrideNotFound => "No override is set; the deployment value is inherited",
            Self::ConfigInvalid => "Configuration value is invalid",
            Self::Unsupported => "Operation is not supported by this configuration backend",
            Self::StorageError => "Override storage operation failed",
            Self::Cancelled => "Request was cancelled",
            Self::DeadlineExceeded => "Request deadline exceeded",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Errors produced while resolving or mutating runtime configuration
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    /// A store-touching operation ran on an entry whose key was never assigned
    #[error("runtime config key not set")]
    KeyNotSet,

    /// No override exists for the key in the resolver's scope
    #[error("runtime config entry not found: {key}")]
    EntryNotFound {
        /// Logical key that was looked up
        key: String,
    },

    /// A string could not be parsed into the target type
    #[error("invalid {type_name} value {input:?}: {reason}")]
    InvalidValue {
        /// Name of the target type
        type_name: &'static str,
        /// Offending input
        input: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A startup option failed to apply its default or environment value
    #[error("option {option:?}: {source}")]
    InvalidOption {
        /// Option name
        option: String,
        /// Underlying failure
        #[source]
        source: Box<RuntimeConfigError>,
    },

    /// The supplied resolver or mutator does not implement the operation
    #[error("{operation} is not supported by {backend}")]
    Unsupported {
        /// Operation attempted
        operation: &'static str,
        /// Backend that refused it
        backend: &'static str,
    },

    /// The override store failed
    #[error("override store {operation} failed: {source}")]
    Store {
        /// Store operation that failed
        operation: &'static str,
        /// Underlying store error
        #[source]
        source: BoxedSource,
    },

    /// The request context was cancelled while a store call was in flight
    #[error("runtime config request cancelled")]
    Cancelled,

    /// The request context deadline elapsed while a store call was in flight
    #[error("runtime config request deadline exceeded")]
    DeadlineExceeded,
}

impl RuntimeConfigError {
    /// Build an `InvalidValue` error naming the input and target type
    #[must_use]
    pub fn invalid_value(
        type_name: &'static str,
        input: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::InvalidValue {
            type_name,
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a store failure
    #[must_use]
    pub fn store<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        Self::Store {
            operation,
            source: source.into(),
        }
    }

    /// Attach the option name to a failure raised while applying it
    #[must_use]
    pub fn for_option(self, option: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error is the missing-key wiring bug
    #[must_use]
    pub const fn is_key_not_set(&self) -> bool {
        matches!(self, Self::KeyNotSet)
    }

    /// Whether the error only signals that no override is present
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound { .. })
    }

    /// Whether the error is a parse failure, possibly wrapped by an option
    #[must_use]
    pub fn is_invalid_value(&self) -> bool {
        match self {
            Self::InvalidValue { .. } => true,
            Self::InvalidOption { source, .. } => source.is_invalid_value(),
            _ => false,
        }
    }

    /// Classification for administrative surfaces
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::KeyNotSet => ErrorCode::KeyNotSet,
            Self::EntryNotFound { .. } => ErrorCode::OverrideNotFound,
            Self::InvalidValue { .. } => ErrorCode::ConfigInvalid,
            Self::InvalidOption { source, .. } => source.code(),
            Self::Unsupported { .. } => ErrorCode::Unsupported,
            Self::Store { .. } => ErrorCode::StorageError,
            Self::Cancelled => ErrorCode::Cancelled,
            Self::DeadlineExceeded => ErrorCode::DeadlineExceeded,
        }
    }
}
