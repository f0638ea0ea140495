//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels
//! - Console output
//! - JSON local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use catalog_export::logging::init_logging;
//! use catalog_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use catalog_export::log_export_start;
///
/// let run_id = uuid::Uuid::new_v4();
/// log_export_start!(run_id, "catalog_product");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($run_id:expr, $entity_type:expr) => {
        tracing::info!(
            run_id = %$run_id,
            entity_type = %$entity_type,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use catalog_export::log_export_complete;
/// use std::time::Duration;
///
/// let rows = 42;
/// let duration = Duration::from_secs(10);
/// log_export_complete!(rows, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($rows:expr, $duration:expr) => {
        tracing::info!(
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use catalog_export::log_error_with_context;
/// use catalog_export::domain::ExportError;
///
/// let error = ExportError::Customization("links unavailable".to_string());
/// log_error_with_context!(&error, "Row customizer failed");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a cursor batch
///
/// # Example
///
/// ```no_run
/// use catalog_export::log_batch_processing;
///
/// log_batch_processing!(3, 100, 1000);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($batch:expr, $entities:expr, $total:expr) => {
        tracing::debug!(
            batch = $batch,
            entities = $entities,
            total = $total,
            "Processing batch"
        );
    };
}
