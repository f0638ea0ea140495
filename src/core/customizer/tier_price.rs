//! Tier prices

use super::traits::RowCustomizer;
use crate::adapters::catalog::CatalogRepository;
use crate::core::codec::{CompositeFormat, OptionGroup};
use crate::core::row::{Cell, ExportRow};
use crate::domain::product::decimal;
use crate::domain::{ProductId, Result, StoreConfiguration, TierPrice};
use async_trait::async_trait;
use std::collections::BTreeMap;

pub const TIER_PRICES: &str = "tier_prices";

/// Website or customer group value meaning "every one"
pub const ALL: &str = "all";

/// Adds quantity-based price tiers
#[derive(Debug, Default)]
pub struct TierPriceCustomizer {
    tiers: BTreeMap<ProductId, Vec<TierPrice>>,
    stores: StoreConfiguration,
}

impl TierPriceCustomizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn group(&self, tier: &TierPrice) -> OptionGroup {
        let website = tier
            .website_id
            .and_then(|id| self.stores.website_code(id))
            .unwrap_or(ALL);

        OptionGroup::new()
            .with("website", website)
            .with("customer_group", tier.customer_group.as_deref().unwrap_or(ALL))
            .with("qty", decimal(tier.qty))
            .with("price", decimal(tier.value))
            .with("value_type", tier.value_type.as_str())
    }
}

#[async_trait]
impl RowCustomizer for TierPriceCustomizer {
    fn header_columns(&self) -> Vec<String> {
        vec![TIER_PRICES.to_string()]
    }

    async fn prepare_data(
        &mut self,
        repository: &dyn CatalogRepository,
        ids: &[ProductId],
    ) -> Result<()> {
        self.stores = repository.store_configuration().await?;
        self.tiers = repository.tier_prices(ids).await?;
        Ok(())
    }

    fn add_data(&self, mut row: ExportRow, id: ProductId) -> ExportRow {
        if let Some(tiers) = self.tiers.get(&id) {
            let groups = tiers.iter().map(|t| self.group(t)).collect();
            row.set(TIER_PRICES, Cell::composite(CompositeFormat::TierPrices, groups));
        }
        row
    }
}
