// ABOUTME: Core types for layered runtime configuration resolution
// ABOUTME: Foundation crate with error handling, organization identifiers, and value codecs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Runtime Config Core
//!
//! Foundation crate shared by the runtime configuration library and its tooling.
//! It changes infrequently, which keeps incremental builds of the main crate fast.
//!
//! ## Modules
//!
//! - **errors**: `RuntimeConfigError`, its `ErrorCode` classification, and `RuntimeConfigResult`
//! - **models**: Scope identifiers such as `OrganizationId`
//! - **values**: The `ConfigValue` codec contract and its built-in implementations

/// Unified error type for configuration resolution and mutation
pub mod errors;

/// Identifier types for configuration scopes
pub mod models;

/// Typed value codecs (parse from string, encode to canonical string)
pub mod values;

pub use errors::{ErrorCode, RuntimeConfigError, RuntimeConfigResult};
pub use models::OrganizationId;
pub use values::{ConfigValue, HostPort, Json, OptionTarget, StringArray};
