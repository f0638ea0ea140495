//! Configuration schema types
//!
//! This module defines the configuration structure mapped from the TOML file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Catalog source settings
    pub catalog: CatalogConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CatalogExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        one_of("application.log_level", &self.log_level, &LOG_LEVELS)
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the JSON catalog snapshot
    pub fixture_path: String,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fixture_path.trim().is_empty() {
            return Err("catalog.fixture_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Products fetched per cursor page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pages fetched ahead of encoding; 0 disables the fetch-ahead task
    #[serde(default = "default_prefetch_depth")]
    pub prefetch_depth: usize,

    /// Quote every CSV field
    #[serde(default)]
    pub fields_enclosure: bool,

    /// Artifact output path
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Entity filter
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            prefetch_depth: default_prefetch_depth(),
            fields_enclosure: false,
            output_path: default_output_path(),
            filter: FilterConfig::default(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 || self.page_size > 10000 {
            return Err("export.page_size must be between 1 and 10000".to_string());
        }

        if self.prefetch_depth > 16 {
            return Err("export.prefetch_depth must be between 0 and 16".to_string());
        }

        if self.output_path.trim().is_empty() {
            return Err("export.output_path cannot be empty".to_string());
        }

        self.filter.validate()
    }
}

/// Filter configuration, in the same shape as request parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Category ids (OR semantics); empty means no restriction
    #[serde(default)]
    pub category_ids: Vec<u64>,

    /// `""` any, `"1"` in stock, `"0"` out of stock
    #[serde(default)]
    pub quantity_and_stock_status: String,

    /// Attribute ranges, `code = ["from", "to"]`; an empty bound is open
    #[serde(default)]
    pub ranges: BTreeMap<String, [String; 2]>,
}

impl FilterConfig {
    fn validate(&self) -> Result<(), String> {
        one_of(
            "export.filter.quantity_and_stock_status",
            &self.quantity_and_stock_status,
            &STOCK_STATUSES,
        )?;

        if self.ranges.keys().any(|code| code.trim().is_empty()) {
            return Err("export.filter.ranges cannot contain an empty attribute code".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        one_of("logging.local_rotation", &self.local_rotation, &ROTATIONS)?;

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const STOCK_STATUSES: [&str; 3] = ["", "1", "0"];
const ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let allowed: Vec<String> = allowed.iter().map(|a| format!("{a:?}")).collect();
    Err(format!(
        "{field} is {value:?}, expected one of {}",
        allowed.join(", ")
    ))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> usize {
    500
}

fn default_prefetch_depth() -> usize {
    1
}

fn default_output_path() -> String {
    "catalog_product.csv".to_string()
}

fn default_local_path() -> String {
    "/var/log/catalog-export".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
