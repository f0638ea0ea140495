//! Catalog repository abstraction
//!
//! This module defines the trait a catalog storage backend must implement to
//! feed the export engine. The engine only reads through it.

use crate::domain::{
    AttributeDescriptor, Category, ConfigurableLinks, EntityType, FilterSpec, Product, ProductId,
    ProductLink, Result, StockItem, StoreConfiguration, TierPrice,
};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Keyset page request over product ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Return only products with an id greater than this one
    pub after: Option<ProductId>,

    /// Maximum number of products in the page
    pub limit: usize,
}

impl PageRequest {
    /// First page of the given size
    pub fn first(limit: usize) -> Self {
        Self { after: None, limit }
    }

    /// Page following the given product id
    pub fn after(id: ProductId, limit: usize) -> Self {
        Self {
            after: Some(id),
            limit,
        }
    }
}

/// Catalog collaborator trait
///
/// Every read goes through here. Failures are reported as
/// [`ExportError::DataSource`](crate::domain::ExportError::DataSource) and
/// are fatal for the run.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Exportable attribute metadata for an entity type
    ///
    /// May contain duplicates; the attribute catalog rejects conflicting ones.
    async fn attribute_metadata(&self, entity_type: EntityType) -> Result<Vec<AttributeDescriptor>>;

    /// Current websites, store views and price scope
    async fn store_configuration(&self) -> Result<StoreConfiguration>;

    /// The complete category tree
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Ids of every product matching the filter, in ascending order
    async fn matching_ids(&self, filter: &FilterSpec) -> Result<Vec<ProductId>>;

    /// One page of products matching the filter, in ascending id order
    ///
    /// # Arguments
    ///
    /// * `filter` - Filter to apply before paging
    /// * `page` - Keyset position and page size
    async fn list(&self, filter: &FilterSpec, page: PageRequest) -> Result<Vec<Product>>;

    /// Stock records for the given products; products without a record are absent
    async fn stock_items(&self, ids: &[ProductId]) -> Result<BTreeMap<ProductId, StockItem>>;

    /// Configurable links for the given products; non-configurable products are absent
    async fn configurable_links(
        &self,
        ids: &[ProductId],
    ) -> Result<BTreeMap<ProductId, ConfigurableLinks>>;

    /// Related, cross-sell and up-sell links for the given products;
    /// products without links are absent
    async fn product_links(
        &self,
        ids: &[ProductId],
    ) -> Result<BTreeMap<ProductId, Vec<ProductLink>>>;

    /// Tier prices for the given products
    async fn tier_prices(&self, ids: &[ProductId]) -> Result<BTreeMap<ProductId, Vec<TierPrice>>>;
}
