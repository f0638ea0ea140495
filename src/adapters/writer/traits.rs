//! Row sink abstraction

use crate::domain::Result;

/// Receives the header and then every encoded row, in emission order
///
/// Cells arrive already encoded; quoting and escaping are the sink's job.
pub trait RowSink: Send {
    /// Writes the header row; called exactly once, before any data row
    fn write_header(&mut self, columns: &[String]) -> Result<()>;

    /// Writes one data row with one cell per header column
    fn write_row(&mut self, cells: &[String]) -> Result<()>;

    /// Flushes buffered output
    fn flush(&mut self) -> Result<()>;

    /// Discards the run's output after a fatal error
    ///
    /// Sinks that cannot take back written bytes must at least make sure
    /// nothing further is emitted.
    fn abort(&mut self);

    /// Number of data rows accepted so far
    fn rows_written(&self) -> usize;
}
