//! CSV row sink
//!
//! Standard RFC-4180 quoting via the `csv` crate: fields containing the
//! delimiter, a quote or a line break are quoted and embedded quotes are
//! doubled. With fields enclosure enabled every field is quoted.

use super::traits::RowSink;
use crate::domain::{ExportError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// CSV sink over any writer
pub struct CsvSink<W: Write> {
    writer: Option<csv::Writer<W>>,
    rows: usize,
    header_written: bool,
}

impl<W: Write> std::fmt::Debug for CsvSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("rows", &self.rows)
            .field("header_written", &self.header_written)
            .field("aborted", &self.writer.is_none())
            .finish()
    }
}

impl<W: Write> CsvSink<W> {
    /// Creates a sink; `fields_enclosure` quotes every field
    pub fn new(inner: W, fields_enclosure: bool) -> Self {
        let quote_style = if fields_enclosure {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        };

        let writer = WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .double_quote(true)
            .quote_style(quote_style)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);

        Self {
            writer: Some(writer),
            rows: 0,
            header_written: false,
        }
    }

    /// Flushes and returns the underlying writer
    ///
    /// # Errors
    ///
    /// Returns a sink error if the sink was aborted or the final flush fails
    pub fn into_inner(mut self) -> Result<W> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| ExportError::Sink("CSV sink was aborted".to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Sink(format!("Failed to flush CSV output: {}", e.error())))
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<W>> {
        self.writer
            .as_mut()
            .ok_or_else(|| ExportError::Sink("CSV sink was aborted".to_string()))
    }
}

impl<W: Write + Send> RowSink for CsvSink<W> {
    fn write_header(&mut self, columns: &[String]) -> Result<()> {
        if self.header_written {
            return Err(ExportError::Sink("Header already written".to_string()));
        }
        self.writer()?.write_record(columns)?;
        self.header_written = true;
        Ok(())
    }

    fn write_row(&mut self, cells: &[String]) -> Result<()> {
        if !self.header_written {
            return Err(ExportError::Sink(
                "Row written before the header".to_string(),
            ));
        }
        self.writer()?.write_record(cells)?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer()?.flush()?;
        Ok(())
    }

    fn abort(&mut self) {
        if self.writer.take().is_some() {
            tracing::debug!(rows = self.rows, "CSV sink aborted");
        }
    }

    fn rows_written(&self) -> usize {
        self.rows
    }
}
