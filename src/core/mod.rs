//! Core export logic.
//!
//! # Modules
//!
//! - [`attributes`] - Header assembly from catalog attribute metadata
//! - [`cursor`] - Paged entity cursor with optional fetch-ahead
//! - [`scope`] - Expansion of entities into default and store rows
//! - [`codec`] - Composite cell grammar
//! - [`customizer`] - Row customizers adding computed columns
//! - [`row`] - Rows and cells before encoding
//! - [`export`] - The export engine, parameters and run summary
//! - [`verification`] - Artifact checksums
//!
//! # Export Workflow
//!
//! 1. **Parse**: Validate the request parameters into a filter
//! 2. **Header**: Build the ordered column list and append customizer columns
//! 3. **Prepare**: Let customizers load data for the filtered id set
//! 4. **Stream**: Page through entities, expand scopes, customize, encode
//! 5. **Report**: Checksum the artifact and log the summary
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_export::adapters::catalog::InMemoryCatalog;
//! use catalog_export::core::export::{EngineConfig, ExportEngine, RawExportParameters};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = InMemoryCatalog::from_json_file("catalog.json")?;
//! let mut engine = ExportEngine::new(Arc::new(catalog), EngineConfig::default());
//!
//! let params = RawExportParameters::new().filter_text("category_ids", "2,13");
//! let outcome = engine.export(&params).await;
//!
//! println!("Rows: {}", outcome.artifact.row_count);
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod codec;
pub mod cursor;
pub mod customizer;
pub mod export;
pub mod row;
pub mod scope;
pub mod verification;
