//! Configurable product links

use super::traits::RowCustomizer;
use crate::adapters::catalog::CatalogRepository;
use crate::core::codec::{CompositeFormat, OptionGroup};
use crate::core::row::{Cell, ExportRow};
use crate::domain::{ConfigurableLinks, ProductId, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

pub const CONFIGURABLE_VARIATIONS: &str = "configurable_variations";
pub const CONFIGURABLE_VARIATION_LABELS: &str = "configurable_variation_labels";

/// Adds child SKUs and super attribute labels of configurable products
#[derive(Debug, Default)]
pub struct ConfigurableVariationsCustomizer {
    links: BTreeMap<ProductId, ConfigurableLinks>,
}

impl ConfigurableVariationsCustomizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn variations(links: &ConfigurableLinks) -> Vec<OptionGroup> {
        links
            .children
            .iter()
            .map(|child| {
                let mut group = OptionGroup::new().with("sku", child.sku.as_str());
                for attribute in &links.attributes {
                    if let Some(value) = child.values.get(&attribute.code) {
                        group.push(attribute.code.as_str(), value.as_str());
                    }
                }
                group
            })
            .collect()
    }

    fn labels(links: &ConfigurableLinks) -> Vec<OptionGroup> {
        let group: OptionGroup = links
            .attributes
            .iter()
            .map(|a| (a.code.as_str(), a.label.as_str()))
            .collect();
        if group.is_empty() {
            Vec::new()
        } else {
            vec![group]
        }
    }
}

#[async_trait]
impl RowCustomizer for ConfigurableVariationsCustomizer {
    fn header_columns(&self) -> Vec<String> {
        vec![
            CONFIGURABLE_VARIATIONS.to_string(),
            CONFIGURABLE_VARIATION_LABELS.to_string(),
        ]
    }

    async fn prepare_data(
        &mut self,
        repository: &dyn CatalogRepository,
        ids: &[ProductId],
    ) -> Result<()> {
        self.links = repository.configurable_links(ids).await?;
        tracing::debug!(products = self.links.len(), "Loaded configurable links");
        Ok(())
    }

    fn add_data(&self, mut row: ExportRow, id: ProductId) -> ExportRow {
        if let Some(links) = self.links.get(&id) {
            row.set(
                CONFIGURABLE_VARIATIONS,
                Cell::composite(CompositeFormat::Variations, Self::variations(links)),
            );
            row.set(
                CONFIGURABLE_VARIATION_LABELS,
                Cell::composite(CompositeFormat::VariationLabels, Self::labels(links)),
            );
        }
        row
    }
}
