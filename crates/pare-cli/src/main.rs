//! Pare CLI - trim recurring charges and subscription waste
//!
//! Usage:
//!   pare analyze --file export.csv    Full pipeline with savings report
//!   pare recurring --file export.csv  Just the recurring-charge detection
//!   pare patterns --file export.csv   Anonymized patterns for external matching
//!   pare catalog list                 Browse the subscription catalog

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            overlay,
            json,
        } => {
            let catalog = commands::load_catalog(cli.catalog.as_deref())?;
            commands::cmd_analyze(&file, overlay.as_deref(), &catalog, json)
        }
        Commands::Recurring { file, json } => commands::cmd_recurring(&file, json),
        Commands::Patterns { file } => commands::cmd_patterns(&file),
        Commands::Catalog { action } => {
            let catalog = commands::load_catalog(cli.catalog.as_deref())?;
            match action {
                None | Some(CatalogAction::List) => commands::cmd_catalog_list(&catalog),
                Some(CatalogAction::Show { name }) => commands::cmd_catalog_show(&catalog, &name),
            }
        }
    }
}
