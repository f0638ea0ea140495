//! Configuration management.
//!
//! TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CATALOG_EXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use catalog_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("catalog-export.toml")?;
//!
//! println!("Catalog: {}", config.catalog.fixture_path);
//! println!("Page size: {}", config.export.page_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [catalog]
//! fixture_path = "${CATALOG_FIXTURE}"
//!
//! [export]
//! page_size = 500
//! prefetch_depth = 1
//! fields_enclosure = false
//! output_path = "catalog_product.csv"
//!
//! [export.filter]
//! category_ids = [2, 13]
//! quantity_and_stock_status = "1"
//! ranges = { price = ["1", "100"] }
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/catalog-export"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, CatalogConfig, CatalogExportConfig, ExportConfig, FilterConfig,
    LoggingConfig,
};
