//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pare - Trim recurring charges and subscription waste
#[derive(Parser)]
#[command(name = "pare")]
#[command(about = "Find recurring charges in bank exports and what switching would save", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Catalog JSON file
    ///
    /// Overrides the PARE_CATALOG environment variable and the copy in the
    /// user data dir. When none of those are set, the snapshot bundled into
    /// the binary is used.
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full analysis: detect recurring charges, match the catalog, report savings
    Analyze {
        /// Bank CSV export to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// JSON file with external match suggestions to merge in
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Print the full result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Detect recurring charges without matching or reporting
    Recurring {
        /// Bank CSV export to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print anonymized charge patterns, one per line
    Patterns {
        /// Bank CSV export to analyze
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Browse the subscription catalog (list, show)
    Catalog {
        #[command(subcommand)]
        action: Option<CatalogAction>,
    },
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List catalog services grouped by category
    List,

    /// Show one service with all its savings options
    Show {
        /// Service name (case-insensitive)
        name: String,
    },
}
