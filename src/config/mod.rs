// ABOUTME: Configuration module for process settings and the deployment value registry
// ABOUTME: Environment-only store settings plus typed, overridable deployment fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: override store backend settings from environment variables
//! - **Deployment**: the registry of typed deployment values, bound to startup
//!   options and addressable by name for runtime overrides

/// Deployment value registry and type-erased runtime fields
pub mod deployment;
/// Environment and store configuration
pub mod environment;

pub use deployment::{DeploymentValues, RuntimeField};
pub use environment::{StoreKind, StoreSettings};
