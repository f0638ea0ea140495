//! Export orchestration
//!
//! This module provides the export run itself:
//! - Request parameter parsing and validation
//! - The export engine and its state machine
//! - Summary and reporting

pub mod engine;
pub mod parameters;
pub mod summary;

pub use engine::{
    EngineConfig, EngineState, ExportArtifact, ExportEngine, ExportOutcome, RunStats,
};
pub use parameters::{ExportParameters, FilterValue, RawExportParameters};
pub use summary::{ExportSummary, RunFailure};
