//! Catalog repository factory

use super::memory::InMemoryCatalog;
use super::traits::CatalogRepository;
use crate::config::CatalogConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the catalog repository described by the configuration
///
/// # Errors
///
/// Returns a data source error if the catalog snapshot cannot be loaded
pub fn create_catalog_repository(config: &CatalogConfig) -> Result<Arc<dyn CatalogRepository>> {
    tracing::info!(fixture_path = %config.fixture_path, "Creating in-memory catalog");
    let catalog = InMemoryCatalog::from_json_file(&config.fixture_path)?;
    Ok(Arc::new(catalog) as Arc<dyn CatalogRepository>)
}
