//! Export command implementation
//!
//! This module implements the `export` command, which exports the JSON
//! fixture catalog named in the configuration to a CSV file.

use crate::adapters::catalog::create_catalog_repository;
use crate::config::{load_config, CatalogExportConfig};
use crate::core::export::{EngineConfig, ExportEngine, RawExportParameters};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override the output file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Quote every CSV field
    #[arg(long)]
    pub fields_enclosure: bool,

    /// Override the category filter (comma-separated ids)
    #[arg(long)]
    pub category_ids: Option<String>,

    /// Override the stock status filter ("", "1" or "0")
    #[arg(long)]
    pub stock_status: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let raw = self.apply_overrides(&mut config);

        let repository = match create_catalog_repository(&config.catalog) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open catalog");
                eprintln!("Failed to open catalog: {e}");
                return Ok(4); // Catalog error exit code
            }
        };

        println!("🚀 Exporting catalog to {}", config.export.output_path);

        let mut engine = ExportEngine::new(repository, EngineConfig::from(&config.export));
        let outcome = engine.export(&raw).await;
        let summary = &outcome.summary;

        if let Some(failure) = &summary.failure {
            println!("❌ Export failed ({})", failure.kind);
            println!("   Error: {}", failure.message);
            println!("   No output was written.");
            return Ok(1);
        }

        std::fs::write(&config.export.output_path, outcome.artifact.contents.as_bytes())?;

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Run ID: {}", summary.run_id);
        println!("  Entities: {}", summary.entities_exported);
        println!("  Rows: {}", summary.rows_written);
        println!("  Batches: {}", summary.batches);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        if let Some(checksum) = &summary.checksum {
            println!("  SHA-256: {checksum}");
        }
        println!();
        println!("✅ Export completed successfully!");

        Ok(0)
    }

    /// Applies CLI overrides and returns the request parameters
    fn apply_overrides(&self, config: &mut CatalogExportConfig) -> RawExportParameters {
        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding output path from CLI");
            config.export.output_path = output.clone();
        }

        if self.fields_enclosure {
            config.export.fields_enclosure = true;
        }

        let mut raw = RawExportParameters::from_config(&config.export);

        // Text values go through request validation, not config validation
        if let Some(ids) = &self.category_ids {
            tracing::info!(category_ids = %ids, "Overriding category filter from CLI");
            raw = raw.filter_text("category_ids", ids.as_str());
        }
        if let Some(status) = &self.stock_status {
            tracing::info!(stock_status = %status, "Overriding stock status filter from CLI");
            raw = raw.filter_text("quantity_and_stock_status", status.as_str());
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use crate::core::export::FilterValue;

    fn config() -> CatalogExportConfig {
        load_config_str(
            r#"
[catalog]
fixture_path = "catalog.json"

[export.filter]
category_ids = [2]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs::default();
        let mut config = config();
        let raw = args.apply_overrides(&mut config);

        assert!(!raw.fields_enclosure);
        assert_eq!(config.export.output_path, "catalog_product.csv");
        assert_eq!(
            raw.export_filter.get("category_ids"),
            Some(&FilterValue::Text("2".to_string()))
        );
    }

    #[test]
    fn test_export_args_with_overrides() {
        let args = ExportArgs {
            output: Some("out.csv".to_string()),
            fields_enclosure: true,
            category_ids: Some("2,13".to_string()),
            stock_status: Some("0".to_string()),
        };
        let mut config = config();
        let raw = args.apply_overrides(&mut config);

        assert!(raw.fields_enclosure);
        assert_eq!(config.export.output_path, "out.csv");
        assert_eq!(
            raw.export_filter.get("category_ids"),
            Some(&FilterValue::Text("2,13".to_string()))
        );
        assert_eq!(
            raw.export_filter.get("quantity_and_stock_status"),
            Some(&FilterValue::Text("0".to_string()))
        );
    }
}
