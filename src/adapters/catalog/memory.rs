//! In-memory catalog backed by a JSON snapshot
//!
//! Used by the command-line runner (loading a fixture file) and by tests. The
//! snapshot sits behind an async `RwLock`, so changes made through the
//! mutation helpers are visible to every export started afterwards.

use super::traits::{CatalogRepository, PageRequest};
use crate::domain::{
    AttributeDescriptor, AttributeValue, Category, ConfigurableLinks, DataSourceError, EntityType,
    FilterSpec, PriceScope, Product, ProductId, ProductLink, Result, StockItem, StoreConfiguration,
    StoreId, TierPrice, WebsiteId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Serializable catalog contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,

    #[serde(default)]
    pub store_configuration: StoreConfiguration,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub stock: BTreeMap<ProductId, StockItem>,

    #[serde(default)]
    pub configurable_links: BTreeMap<ProductId, ConfigurableLinks>,

    #[serde(default)]
    pub product_links: BTreeMap<ProductId, Vec<ProductLink>>,

    #[serde(default)]
    pub tier_prices: BTreeMap<ProductId, Vec<TierPrice>>,
}

/// Catalog repository over an in-memory snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    snapshot: Arc<RwLock<CatalogSnapshot>>,
}

impl InMemoryCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Loads a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a data source error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DataSourceError::ConnectionFailed(format!(
                "Failed to read catalog fixture {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses a snapshot from JSON text
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(contents)
            .map_err(|e| DataSourceError::InvalidData(format!("Invalid catalog fixture: {e}")))?;
        tracing::debug!(
            products = snapshot.products.len(),
            attributes = snapshot.attributes.len(),
            "Loaded catalog snapshot"
        );
        Ok(Self::new(snapshot))
    }

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn set_price_scope(&self, scope: PriceScope) {
        self.snapshot.write().await.store_configuration.price_scope = scope;
    }

    /// Inserts a product or replaces the one with the same id
    pub async fn upsert_product(&self, product: Product) {
        let mut snapshot = self.snapshot.write().await;
        match snapshot.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => snapshot.products.push(product),
        }
    }

    /// Replaces the stock record of a product
    pub async fn set_stock(&self, id: ProductId, stock: StockItem) {
        self.snapshot.write().await.stock.insert(id, stock);
    }

    /// Assigns a product to a website; returns false if the product is unknown
    pub async fn assign_website(&self, sku: &str, website: WebsiteId) -> bool {
        self.with_product(sku, |p| {
            p.website_ids.insert(website);
        })
        .await
    }

    /// Sets a website-level value; returns false if the product is unknown
    pub async fn set_website_value(
        &self,
        sku: &str,
        website: WebsiteId,
        code: &str,
        value: impl Into<AttributeValue>,
    ) -> bool {
        let value = value.into();
        self.with_product(sku, |p| {
            p.website_values
                .entry(website)
                .or_default()
                .insert(code.to_string(), value);
        })
        .await
    }

    /// Sets a store-level value; returns false if the product is unknown
    pub async fn set_store_value(
        &self,
        sku: &str,
        store: StoreId,
        code: &str,
        value: impl Into<AttributeValue>,
    ) -> bool {
        let value = value.into();
        self.with_product(sku, |p| {
            p.store_values
                .entry(store)
                .or_default()
                .insert(code.to_string(), value);
        })
        .await
    }

    async fn with_product(&self, sku: &str, apply: impl FnOnce(&mut Product)) -> bool {
        let mut snapshot = self.snapshot.write().await;
        match snapshot.products.iter_mut().find(|p| p.sku == sku) {
            Some(product) => {
                apply(product);
                true
            }
            None => false,
        }
    }
}

impl CatalogSnapshot {
    fn stock_for(&self, id: ProductId) -> StockItem {
        self.stock.get(&id).cloned().unwrap_or_default()
    }

    fn filtered<'a>(&'a self, filter: &'a FilterSpec) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| filter.matches(p, &self.stock_for(p.id)))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn attribute_metadata(&self, entity_type: EntityType) -> Result<Vec<AttributeDescriptor>> {
        match entity_type {
            EntityType::CatalogProduct => Ok(self.snapshot.read().await.attributes.clone()),
        }
    }

    async fn store_configuration(&self) -> Result<StoreConfiguration> {
        Ok(self.snapshot.read().await.store_configuration.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.snapshot.read().await.categories.clone())
    }

    async fn matching_ids(&self, filter: &FilterSpec) -> Result<Vec<ProductId>> {
        let snapshot = self.snapshot.read().await;
        let mut ids: Vec<ProductId> = snapshot.filtered(filter).map(|p| p.id).collect();
        ids.sort();
        Ok(ids)
    }

    async fn list(&self, filter: &FilterSpec, page: PageRequest) -> Result<Vec<Product>> {
        let snapshot = self.snapshot.read().await;
        let mut products: Vec<&Product> = snapshot
            .filtered(filter)
            .filter(|p| page.after.map_or(true, |after| p.id > after))
            .collect();
        products.sort_by_key(|p| p.id);
        Ok(products.into_iter().take(page.limit).cloned().collect())
    }

    async fn stock_items(&self, ids: &[ProductId]) -> Result<BTreeMap<ProductId, StockItem>> {
        let snapshot = self.snapshot.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| snapshot.stock.get(id).map(|s| (*id, s.clone())))
            .collect())
    }

    async fn configurable_links(
        &self,
        ids: &[ProductId],
    ) -> Result<BTreeMap<ProductId, ConfigurableLinks>> {
        let snapshot = self.snapshot.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| snapshot.configurable_links.get(id).map(|l| (*id, l.clone())))
            .collect())
    }

    async fn product_links(
        &self,
        ids: &[ProductId],
    ) -> Result<BTreeMap<ProductId, Vec<ProductLink>>> {
        let snapshot = self.snapshot.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| snapshot.product_links.get(id).map(|l| (*id, l.clone())))
            .collect())
    }

    async fn tier_prices(&self, ids: &[ProductId]) -> Result<BTreeMap<ProductId, Vec<TierPrice>>> {
        let snapshot = self.snapshot.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| snapshot.tier_prices.get(id).map(|t| (*id, t.clone())))
            .collect())
    }
}
