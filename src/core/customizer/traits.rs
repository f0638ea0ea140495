//! Row customizer abstraction

use crate::adapters::catalog::CatalogRepository;
use crate::core::row::ExportRow;
use crate::domain::{ProductId, Result};
use async_trait::async_trait;

/// Injects computed columns into rows before encoding
///
/// `prepare_data` runs once per export for the whole filtered id set;
/// `add_data` runs for every row (default and store rows) afterwards.
#[async_trait]
pub trait RowCustomizer: Send + Sync {
    /// Columns this customizer adds, appended to the header in order
    fn header_columns(&self) -> Vec<String>;

    /// Loads whatever `add_data` needs for the given products
    ///
    /// # Errors
    ///
    /// Any error aborts the run with an empty artifact.
    async fn prepare_data(
        &mut self,
        repository: &dyn CatalogRepository,
        ids: &[ProductId],
    ) -> Result<()>;

    /// Augments one row of the given product
    fn add_data(&self, row: ExportRow, id: ProductId) -> ExportRow;
}
