//! Export engine - orchestrates one export run
//!
//! The run moves through `Idle -> HeaderBuilt -> Streaming` and ends in
//! `Complete` or `Failed`. Any fatal error yields an empty artifact at the
//! [`ExportEngine::export`] boundary; nothing written before the failure
//! is surfaced to the caller.

use super::parameters::{ExportParameters, RawExportParameters};
use super::summary::ExportSummary;
use crate::adapters::catalog::CatalogRepository;
use crate::adapters::writer::{CsvSink, RowSink};
use crate::config::ExportConfig;
use crate::core::attributes::AttributeCatalog;
use crate::core::codec::{Enclosure, MultiValueEncoder};
use crate::core::cursor::{CursorOptions, EntityCursor};
use crate::core::customizer::{default_product_customizer, CompositeRowCustomizer, RowCustomizer};
use crate::core::scope::ScopeResolver;
use crate::core::verification::artifact_checksum;
use crate::domain::{EntityType, ExportError, Result};
use crate::{log_batch_processing, log_error_with_context, log_export_complete, log_export_start};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub page_size: usize,
    pub prefetch_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let options = CursorOptions::default();
        Self {
            page_size: options.page_size,
            prefetch_depth: options.prefetch_depth,
        }
    }
}

impl From<&ExportConfig> for EngineConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            page_size: config.page_size,
            prefetch_depth: config.prefetch_depth,
        }
    }
}

/// Run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    HeaderBuilt,
    Streaming,
    Complete,
    Failed,
}

/// Counters of a streamed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Header columns in output order
    pub columns: Vec<String>,
    pub entities: usize,
    pub rows: usize,
    pub batches: usize,
}

/// Assembled CSV document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportArtifact {
    /// UTF-8 CSV text, header first; empty after a failed run
    pub contents: String,
    pub header: Vec<String>,
    /// Data rows, header excluded
    pub row_count: usize,
}

impl ExportArtifact {
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Artifact plus the run summary
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    pub summary: ExportSummary,
}

impl ExportOutcome {
    pub fn is_successful(&self) -> bool {
        self.summary.is_successful()
    }
}

/// Catalog export engine
///
/// Runs are sequential; the engine can be reused for another run once the
/// previous one has returned. Catalog changes made before a run starts are
/// visible to it.
pub struct ExportEngine {
    repository: Arc<dyn CatalogRepository>,
    config: EngineConfig,
    entity_type: EntityType,
    customizer: CompositeRowCustomizer,
    state: EngineState,
}

impl ExportEngine {
    /// Creates an engine with the default product customizers
    pub fn new(repository: Arc<dyn CatalogRepository>, config: EngineConfig) -> Self {
        Self {
            repository,
            config,
            entity_type: EntityType::CatalogProduct,
            customizer: default_product_customizer(),
            state: EngineState::Idle,
        }
    }

    /// Appends a customizer after the ones already registered
    pub fn with_customizer(mut self, customizer: Box<dyn RowCustomizer>) -> Self {
        self.customizer = std::mem::take(&mut self.customizer).with(customizer);
        self
    }

    /// Removes every registered customizer
    pub fn without_customizers(mut self) -> Self {
        self.customizer = CompositeRowCustomizer::new();
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Runs an export into an in-memory CSV artifact
    ///
    /// Never returns a partial artifact: on any failure the artifact is
    /// empty and the summary records the error class.
    pub async fn export(&mut self, raw: &RawExportParameters) -> ExportOutcome {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        let mut summary = ExportSummary::new(run_id);
        log_export_start!(run_id, self.entity_type);

        let mut sink = CsvSink::new(Vec::new(), raw.fields_enclosure);
        let span = tracing::info_span!("export_run", run_id = %run_id);
        let result = self.export_to(raw, &mut sink).instrument(span).await;

        let assembled = result.and_then(|stats| {
            let bytes = sink.into_inner()?;
            let contents = String::from_utf8(bytes)
                .map_err(|e| ExportError::Sink(format!("Artifact is not valid UTF-8: {}", e)))?;
            Ok((stats, contents))
        });

        let artifact = match assembled {
            Ok((stats, contents)) => {
                summary.entities_exported = stats.entities;
                summary.rows_written = stats.rows;
                summary.batches = stats.batches;
                summary.checksum = Some(artifact_checksum(contents.as_bytes()));
                ExportArtifact {
                    contents,
                    header: stats.columns,
                    row_count: stats.rows,
                }
            }
            Err(e) => {
                self.state = EngineState::Failed;
                summary.fail(e.kind(), e.to_string());
                ExportArtifact::default()
            }
        };

        summary = summary.with_duration(started.elapsed());
        if summary.is_successful() {
            log_export_complete!(summary.rows_written, summary.duration);
        }
        summary.log_summary();

        ExportOutcome { artifact, summary }
    }

    /// Streams an export into a caller-provided sink
    ///
    /// On failure the sink is aborted before the error is returned.
    ///
    /// # Errors
    ///
    /// * [`ExportError::Validation`] - malformed request parameters
    /// * [`ExportError::Schema`] - inconsistent attribute metadata, or a
    ///   composite value that cannot be encoded
    /// * [`ExportError::DataSource`] - catalog read failure
    /// * [`ExportError::Customization`] - a customizer failed to prepare data
    /// * [`ExportError::Sink`] - the sink rejected output
    pub async fn export_to(
        &mut self,
        raw: &RawExportParameters,
        sink: &mut dyn RowSink,
    ) -> Result<RunStats> {
        self.state = EngineState::Idle;
        let mut stats = RunStats::default();

        match self.run(raw, sink, &mut stats).await {
            Ok(()) => {
                self.state = EngineState::Complete;
                Ok(stats)
            }
            Err(e) => {
                log_error_with_context!(&e, "Export run failed");
                self.state = EngineState::Failed;
                sink.abort();
                Err(e)
            }
        }
    }

    async fn run(
        &mut self,
        raw: &RawExportParameters,
        sink: &mut dyn RowSink,
        stats: &mut RunStats,
    ) -> Result<()> {
        let mut params = ExportParameters::parse(raw)?;

        let mut header = AttributeCatalog::new(self.repository.clone())
            .build_header(self.entity_type)
            .await?;
        header.append_columns(self.customizer.header_columns())?;
        self.state = EngineState::HeaderBuilt;
        tracing::debug!(
            entity_type = %header.entity_type(),
            price_scope = ?header.price_scope(),
            columns = header.columns().len(),
            "Header built"
        );

        params.prune_ranges(&header);
        let stores = self.repository.store_configuration().await?;
        let ids = self.repository.matching_ids(&params.filter).await?;

        self.customizer
            .prepare_data(self.repository.as_ref(), &ids)
            .await
            .map_err(|e| {
                let error = match e {
                    customization @ ExportError::Customization(_) => customization,
                    other => ExportError::Customization(other.to_string()),
                };
                log_error_with_context!(&error, "Row customizer failed to prepare data");
                error
            })?;

        sink.write_header(header.columns())?;
        stats.columns = header.columns().to_vec();
        self.state = EngineState::Streaming;

        let encoder = MultiValueEncoder::new(Enclosure::from(params.fields_enclosure));
        let resolver = ScopeResolver::new(&header, &stores);
        let options = CursorOptions {
            page_size: self.config.page_size,
            prefetch_depth: self.config.prefetch_depth,
        };
        let mut cursor = EntityCursor::open(self.repository.clone(), params.filter, options).await?;

        while let Some(batch) = cursor.next_batch().await? {
            log_batch_processing!(batch.index, batch.len(), ids.len());
            for entity in &batch.entities {
                for row in resolver.expand(entity) {
                    let row = self.customizer.add_data(row, entity.product.id);
                    let cells = row.encode(header.columns(), &encoder)?;
                    sink.write_row(&cells)?;
                    stats.rows += 1;
                }
                stats.entities += 1;
            }
            stats.batches += 1;
        }

        sink.flush()?;
        Ok(())
    }
}
