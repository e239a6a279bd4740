// ABOUTME: Identifier models for configuration scopes
// ABOUTME: Re-exports the organization identifier newtype
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Organization identifier newtype
pub mod organization;

pub use organization::OrganizationId;
