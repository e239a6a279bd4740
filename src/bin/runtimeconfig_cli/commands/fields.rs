// ABOUTME: Field listing command for runtimeconfig-cli
// ABOUTME: Prints every startup option with its key, type, and current startup value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use runtimeconfig::DeploymentValues;

/// Print every option bound by the deployment registry
pub fn list(values: &DeploymentValues, json: bool) -> Result<()> {
    let mut values = values.clone();
    let summaries = values.options().summaries();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in &summaries {
        let overridable = values
            .runtime_field(summary.env)
            .map_or("startup only", |_| "overridable");
        println!(
            "{:<38} {:<13} {:<12} {}",
            summary.env, summary.value_type, overridable, summary.value
        );
    }
    Ok(())
}
