// ABOUTME: Runtime config CLI - administrative tool for viewing and editing runtime overrides
// ABOUTME: Lists fields and reads, writes, or clears deployment and organization overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List overridable fields with their keys and startup values
//! runtimeconfig-cli fields
//!
//! # Show the override and effective value for one organization
//! runtimeconfig-cli get --field notifications_email_from --org 7c9e6679-7425-40de-944b-e07fc1f90ae7
//!
//! # Override a value for one organization
//! runtimeconfig-cli set --field notifications_email_from --org 7c9e6679-7425-40de-944b-e07fc1f90ae7 ops@example.com
//!
//! # Clear the override again
//! runtimeconfig-cli unset --field notifications_email_from --org 7c9e6679-7425-40de-944b-e07fc1f90ae7
//!
//! # List stored overrides in the deployment namespace
//! runtimeconfig-cli list
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use runtimeconfig::{
    logging::LoggingConfig, DeploymentValues, OrganizationId, OverrideStoreBackend, StoreSettings,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "runtimeconfig-cli",
    about = "Runtime configuration override management",
    long_about = "Administrative tool for inspecting and editing deployment-wide and organization-scoped configuration overrides."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// `SQLite` database URL; selects the `SQLite` store
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List overridable fields with their keys and startup values
    Fields {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a field's override and effective value
    Get {
        /// Field name or key
        #[arg(long)]
        field: String,

        /// Organization scope (deployment-wide when omitted)
        #[arg(long)]
        org: Option<OrganizationId>,
    },

    /// Write an override
    Set {
        /// Field name or key
        #[arg(long)]
        field: String,

        /// Organization scope (deployment-wide when omitted)
        #[arg(long)]
        org: Option<OrganizationId>,

        /// New value in the field's string form
        value: String,
    },

    /// Clear an override
    Unset {
        /// Field name or key
        #[arg(long)]
        field: String,

        /// Organization scope (deployment-wide when omitted)
        #[arg(long)]
        org: Option<OrganizationId>,
    },

    /// List stored overrides in one scope
    List {
        /// Organization scope (deployment-wide when omitted)
        #[arg(long)]
        org: Option<OrganizationId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init()?;
    info!("Runtime config CLI");

    let mut settings = StoreSettings::from_env()?;
    if let Some(database_url) = cli.database_url {
        settings = settings.with_database_url(database_url);
    }
    let store = OverrideStoreBackend::from_settings(&settings).await?;
    let values = DeploymentValues::from_env()?;

    match cli.command {
        Command::Fields { json } => commands::fields::list(&values, json)?,
        Command::Get { field, org } => commands::overrides::get(&values, &store, &field, org).await?,
        Command::Set { field, org, value } => {
            commands::overrides::set(&values, &store, &field, org, &value).await?;
        }
        Command::Unset { field, org } => {
            commands::overrides::unset(&values, &store, &field, org).await?;
        }
        Command::List { org } => commands::overrides::list(&store, org).await?,
    }

    Ok(())
}
