//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates every section
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Catalog Fixture: {}", config.catalog.fixture_path);
        println!("  Output Path: {}", config.export.output_path);
        println!("  Page Size: {}", config.export.page_size);
        println!("  Prefetch Depth: {}", config.export.prefetch_depth);
        println!("  Fields Enclosure: {}", config.export.fields_enclosure);
        println!(
            "  Category Filter: {}",
            if config.export.filter.category_ids.is_empty() {
                "All".to_string()
            } else {
                format!("{:?}", config.export.filter.category_ids)
            }
        );
        println!();
        Ok(0)
    }
}
