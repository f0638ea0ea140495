// Catalog Export - Product catalog CSV export engine
// Copyright (c) 2025 Catalog Export Contributors
// Licensed under the MIT License

//! # Catalog Export - product catalog to CSV
//!
//! Catalog Export streams a store's product catalog into a single CSV
//! artifact that round-trips every attribute, including store-view and
//! website scoped values and multi-valued structures such as custom
//! options, configurable product links and tier prices.
//!
//! ## Overview
//!
//! This library provides:
//! - **Header assembly** from catalog attribute metadata plus the fixed
//!   stock item fields
//! - **Paged streaming** of entities matching a declarative filter, with an
//!   optional fetch-ahead task
//! - **Scope expansion** into one default row plus one row per store view
//!   with overridden values
//! - **Composite cells** encoded with a small `key=value,...|...` grammar
//!   that survives outer CSV quoting
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export engine, cursor, scope resolution, codec, customizers
//! - [`adapters`] - Catalog repository and row sink seams
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog_export::adapters::catalog::InMemoryCatalog;
//! use catalog_export::core::export::{EngineConfig, ExportEngine, RawExportParameters};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = InMemoryCatalog::from_json_file("catalog.json")?;
//!     let mut engine = ExportEngine::new(Arc::new(catalog), EngineConfig::default());
//!
//!     let params = RawExportParameters::new()
//!         .fields_enclosure(true)
//!         .filter_text("quantity_and_stock_status", "1");
//!     let outcome = engine.export(&params).await;
//!
//!     println!("Exported {} rows", outcome.artifact.row_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::ExportError`]. An export run never
//! hands back a partial artifact: [`core::export::ExportEngine::export`]
//! returns an empty artifact and records the failure in the summary.
//!
//! ```rust,no_run
//! use catalog_export::domain::ExportError;
//!
//! fn example() -> Result<(), ExportError> {
//!     let config = catalog_export::config::load_config("catalog-export.toml")?;
//!     println!("{}", config.export.output_path);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate; every run logs under a
//! `run_id`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
