//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

/// Why a run produced an empty artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    /// Error class, see [`ExportError::kind`](crate::domain::ExportError::kind)
    pub kind: &'static str,

    /// Error message
    pub message: String,
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Run identifier, present in every log line of the run
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Duration of the run
    pub duration: Duration,

    /// Entities read from the cursor
    pub entities_exported: usize,

    /// Data rows written, store rows included
    pub rows_written: usize,

    /// Cursor batches consumed
    pub batches: usize,

    /// Set when the run failed
    pub failure: Option<RunFailure>,

    /// SHA-256 of the artifact, set on success
    pub checksum: Option<String>,
}

impl ExportSummary {
    /// Create a new summary for a run starting now
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            entities_exported: 0,
            rows_written: 0,
            batches: 0,
            failure: None,
            checksum: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records a failure
    pub fn fail(&mut self, kind: &'static str, message: impl Into<String>) {
        self.failure = Some(RunFailure {
            kind,
            message: message.into(),
        });
    }

    /// Check if the export was successful
    pub fn is_successful(&self) -> bool {
        self.failure.is_none()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        match &self.failure {
            None => tracing::info!(
                run_id = %self.run_id,
                entities = self.entities_exported,
                rows = self.rows_written,
                batches = self.batches,
                duration_ms = self.duration.as_millis() as u64,
                checksum = self.checksum.as_deref().unwrap_or(""),
                "Export summary"
            ),
            Some(failure) => tracing::warn!(
                run_id = %self.run_id,
                kind = failure.kind,
                message = %failure.message,
                duration_ms = self.duration.as_millis() as u64,
                "Export failed, artifact discarded"
            ),
        }
    }
}
