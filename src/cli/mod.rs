//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap. The CLI is a
//! thin runner over the library: it loads configuration, opens the JSON
//! catalog and writes the artifact to a file.

pub mod commands;

use clap::{Parser, Subcommand};

/// Catalog Export - product catalog to CSV
#[derive(Parser, Debug)]
#[command(name = "catalog-export")]
#[command(version, about, long_about = None)]
#[command(author = "Catalog Export Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "catalog-export.toml",
        env = "CATALOG_EXPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CATALOG_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the catalog to a CSV file
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
