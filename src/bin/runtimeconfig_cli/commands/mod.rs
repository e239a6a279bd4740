// ABOUTME: Re-exports command modules for runtimeconfig-cli
// ABOUTME: Provides access to field listing and override management commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod fields;
pub mod overrides;
