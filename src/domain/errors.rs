//! Domain error types
//!
//! This module defines the error hierarchy for the export engine. The variants
//! mirror the failure classes a run can hit: bad attribute metadata, catalog
//! read failures, row customizer failures and malformed composite cells.
//! Third-party error types are converted to strings at the boundary.

use thiserror::Error;

/// Main export error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Inconsistent attribute metadata or an upstream data-integrity bug
    /// detected while encoding. Fatal, raised before or during streaming.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Catalog collaborator read failure. Fatal for the run, never retried.
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    /// Row customizer failure
    #[error("Customization error: {0}")]
    Customization(String),

    /// A composite cell could not be decoded
    #[error("Malformed composite value: {0}")]
    MalformedCompositeValue(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid export parameters
    #[error("Validation error: {0}")]
    Validation(String),

    /// Writer sink errors
    #[error("Sink error: {0}")]
    Sink(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Catalog collaborator errors
///
/// Raised by [`CatalogRepository`](crate::adapters::catalog::CatalogRepository)
/// implementations. None of these are retried by the engine.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Failed to reach the catalog storage
    #[error("Failed to connect to catalog storage: {0}")]
    ConnectionFailed(String),

    /// A read query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The storage returned data that cannot be mapped to catalog entities
    #[error("Invalid catalog data: {0}")]
    InvalidData(String),
}

impl ExportError {
    /// Short, stable label for the error class, used in summaries and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Schema(_) => "schema",
            Self::DataSource(_) => "data_source",
            Self::Customization(_) => "customization",
            Self::MalformedCompositeValue(_) => "malformed_composite_value",
            Self::Configuration(_) => "configuration",
            Self::Validation(_) => "validation",
            Self::Sink(_) => "sink",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        ExportError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Sink(err.to_string())
    }
}
