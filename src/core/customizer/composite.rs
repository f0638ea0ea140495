//! Customizer chaining

use super::traits::RowCustomizer;
use crate::adapters::catalog::CatalogRepository;
use crate::core::row::ExportRow;
use crate::domain::{ProductId, Result};
use async_trait::async_trait;

/// Runs several customizers in registration order
#[derive(Default)]
pub struct CompositeRowCustomizer {
    customizers: Vec<Box<dyn RowCustomizer>>,
}

impl CompositeRowCustomizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, customizer: Box<dyn RowCustomizer>) -> Self {
        self.customizers.push(customizer);
        self
    }

    pub fn len(&self) -> usize {
        self.customizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customizers.is_empty()
    }
}

impl std::fmt::Debug for CompositeRowCustomizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRowCustomizer")
            .field("columns", &self.header_columns())
            .finish()
    }
}

#[async_trait]
impl RowCustomizer for CompositeRowCustomizer {
    fn header_columns(&self) -> Vec<String> {
        self.customizers
            .iter()
            .flat_map(|c| c.header_columns())
            .collect()
    }

    async fn prepare_data(
        &mut self,
        repository: &dyn CatalogRepository,
        ids: &[ProductId],
    ) -> Result<()> {
        for customizer in &mut self.customizers {
            customizer.prepare_data(repository, ids).await?;
        }
        Ok(())
    }

    fn add_data(&self, row: ExportRow, id: ProductId) -> ExportRow {
        self.customizers
            .iter()
            .fold(row, |row, customizer| customizer.add_data(row, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::customizer::{ConfigurableVariationsCustomizer, TierPriceCustomizer};

    #[test]
    fn test_header_columns_concatenate() {
        let composite = CompositeRowCustomizer::new()
            .with(Box::new(ConfigurableVariationsCustomizer::new()))
            .with(Box::new(TierPriceCustomizer::new()));

        assert_eq!(composite.len(), 2);
        assert_eq!(
            composite.header_columns(),
            vec![
                "configurable_variations",
                "configurable_variation_labels",
                "tier_prices"
            ]
        );
    }

    #[test]
    fn test_empty_composite_is_identity() {
        let composite = CompositeRowCustomizer::new();
        let mut row = ExportRow::new();
        row.set("sku", "simple");
        assert_eq!(composite.add_data(row.clone(), ProductId::new(1)), row);
        assert!(composite.header_columns().is_empty());
    }
}
