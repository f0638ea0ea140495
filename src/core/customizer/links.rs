//! Related, cross-sell and up-sell links

use super::traits::RowCustomizer;
use crate::adapters::catalog::CatalogRepository;
use crate::core::row::ExportRow;
use crate::domain::{LinkType, ProductId, ProductLink, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Separator between linked SKUs and between their positions
const LIST_SEPARATOR: &str = ",";

/// Column listing the linked SKUs of one link type
pub fn skus_column(link_type: LinkType) -> String {
    format!("{}_skus", link_type.as_str())
}

/// Column listing the positions matching [`skus_column`]
pub fn position_column(link_type: LinkType) -> String {
    format!("{}_position", link_type.as_str())
}

/// Adds one SKU list and one position list per link type
///
/// Links are ordered by position, then SKU; the n-th position belongs to
/// the n-th SKU.
#[derive(Debug, Default)]
pub struct ProductLinksCustomizer {
    links: BTreeMap<ProductId, BTreeMap<LinkType, Vec<ProductLink>>>,
}

impl ProductLinksCustomizer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RowCustomizer for ProductLinksCustomizer {
    fn header_columns(&self) -> Vec<String> {
        LinkType::ALL
            .iter()
            .flat_map(|t| [skus_column(*t), position_column(*t)])
            .collect()
    }

    async fn prepare_data(
        &mut self,
        repository: &dyn CatalogRepository,
        ids: &[ProductId],
    ) -> Result<()> {
        self.links = repository
            .product_links(ids)
            .await?
            .into_iter()
            .map(|(id, links)| {
                let mut by_type: BTreeMap<LinkType, Vec<ProductLink>> = BTreeMap::new();
                for link in links {
                    by_type.entry(link.link_type).or_default().push(link);
                }
                for links in by_type.values_mut() {
                    links.sort_by(|a, b| {
                        a.position.cmp(&b.position).then_with(|| a.sku.cmp(&b.sku))
                    });
                }
                (id, by_type)
            })
            .collect();

        tracing::debug!(products = self.links.len(), "Loaded product links");
        Ok(())
    }

    fn add_data(&self, mut row: ExportRow, id: ProductId) -> ExportRow {
        let Some(by_type) = self.links.get(&id) else {
            return row;
        };

        for (link_type, links) in by_type {
            let skus: Vec<&str> = links.iter().map(|l| l.sku.as_str()).collect();
            let positions: Vec<String> = links.iter().map(|l| l.position.to_string()).collect();
            row.set(skus_column(*link_type), skus.join(LIST_SEPARATOR));
            row.set(position_column(*link_type), positions.join(LIST_SEPARATOR));
        }
        row
    }
}
