//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_export::adapters::catalog::{CatalogRepository, CatalogSnapshot, InMemoryCatalog, PageRequest};
use catalog_export::core::codec::{MultiValueDecoder, OptionGroup};
use catalog_export::core::customizer::RowCustomizer;
use catalog_export::core::export::{EngineConfig, ExportEngine};
use catalog_export::core::row::ExportRow;
use catalog_export::domain::{
    AttributeDescriptor, AttributeScope, Category, ConfigurableLinks, CustomOption,
    CustomOptionValue, DataSourceError, EntityType, ExportError, FilterSpec, OptionType,
    PriceType, Product, ProductBuilder, ProductId, ProductLink, Result, StockItem, Store,
    StoreConfiguration, StoreId, TierPrice, Website, WebsiteId,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const MULTI_OPTION_SKU: &str = "simple_ms_1";
pub const OUT_OF_STOCK_SKU: &str = "simple_out";
pub const UNCATEGORIZED_SKU: &str = "simple_no_cat";
pub const BROKEN_CATEGORY_SKU: &str = "simple_broken";

pub const SECOND_STORE: &str = "fixture_second_store";

/// Admin, `default` (website `base`) and `fixture_second_store` (website `test`)
pub fn store_configuration() -> StoreConfiguration {
    StoreConfiguration {
        websites: vec![
            Website {
                id: WebsiteId::new(0),
                code: "admin".to_string(),
            },
            Website {
                id: WebsiteId::new(1),
                code: "base".to_string(),
            },
            Website {
                id: WebsiteId::new(2),
                code: "test".to_string(),
            },
        ],
        stores: vec![
            Store {
                id: StoreId::ADMIN,
                code: "admin".to_string(),
                website_id: WebsiteId::new(0),
            },
            Store {
                id: StoreId::new(1),
                code: "default".to_string(),
                website_id: WebsiteId::new(1),
            },
            Store {
                id: StoreId::new(2),
                code: SECOND_STORE.to_string(),
                website_id: WebsiteId::new(2),
            },
        ],
        ..Default::default()
    }
}

pub fn attributes() -> Vec<AttributeDescriptor> {
    vec![
        AttributeDescriptor::new("name").with_scope(AttributeScope::Store),
        AttributeDescriptor::new("price"),
        AttributeDescriptor::new("weight"),
        AttributeDescriptor::new("color")
            .with_scope(AttributeScope::Store)
            .user_defined(),
    ]
}

pub fn categories() -> Vec<Category> {
    vec![
        Category::new(1, None, "Root Catalog"),
        Category::new(2, Some(1), "Default Category"),
        Category::new(13, Some(2), "Category 1"),
        Category::new(50, Some(404), "Orphan"),
    ]
}

fn drop_down(id: u64, title: &str, sort_order: u32) -> CustomOption {
    let mut option = CustomOption::new(id, title, OptionType::DropDown)
        .required()
        .sort_order(sort_order);
    for n in 1..=3u64 {
        option = option.value(
            CustomOptionValue::new(id * 10 + n, format!("Option {n}"))
                .priced(n as f64, PriceType::Fixed)
                .sku(format!("{}-{n}", title.to_lowercase().replace(' ', "-")))
                .sort_order(n as u32),
        );
    }
    option
}

/// Four simple products on website `base`:
///
/// * `simple_ms_1` - two drop-down options with three values each, category 13
/// * `simple_out` - out of stock, category 2
/// * `simple_no_cat` - no category
/// * `simple_broken` - only category is below a missing parent
pub fn snapshot() -> CatalogSnapshot {
    let products = vec![
        ProductBuilder::new(1, MULTI_OPTION_SKU)
            .website(1)
            .category(13)
            .value("name", "Simple Product Multi Option")
            .value("price", "10")
            .value("weight", "1")
            .value("color", "red")
            .option(drop_down(1, "Test Select", 1))
            .option(drop_down(2, "Test Radio", 2))
            .build(),
        ProductBuilder::new(2, OUT_OF_STOCK_SKU)
            .website(1)
            .category(2)
            .value("name", "Out Of Stock")
            .value("price", "20")
            .build(),
        ProductBuilder::new(3, UNCATEGORIZED_SKU)
            .website(1)
            .value("name", "No Category")
            .value("price", "30")
            .build(),
        ProductBuilder::new(4, BROKEN_CATEGORY_SKU)
            .website(1)
            .category(50)
            .value("name", "Broken Category")
            .value("price", "40")
            .build(),
    ];

    let mut stock = BTreeMap::new();
    stock.insert(ProductId::new(1), StockItem::in_stock(100.0));
    stock.insert(ProductId::new(2), StockItem::out_of_stock());
    stock.insert(ProductId::new(3), StockItem::in_stock(5.0));
    stock.insert(ProductId::new(4), StockItem::in_stock(7.0));

    CatalogSnapshot {
        attributes: attributes(),
        store_configuration: store_configuration(),
        categories: categories(),
        products,
        stock,
        ..Default::default()
    }
}

pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(snapshot())
}

pub fn engine(catalog: &InMemoryCatalog) -> ExportEngine {
    ExportEngine::new(Arc::new(catalog.clone()), EngineConfig::default())
}

pub fn product(id: u64, sku: &str) -> Product {
    ProductBuilder::new(id, sku).website(1).build()
}

/// Parses an artifact into header-keyed records
pub fn records(contents: &str) -> Vec<BTreeMap<String, String>> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let headers = reader.headers().unwrap().clone();
    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

/// Records of one SKU in artifact order
pub fn rows_for<'a>(
    records: &'a [BTreeMap<String, String>],
    sku: &str,
) -> Vec<&'a BTreeMap<String, String>> {
    records.iter().filter(|r| r["sku"] == sku).collect()
}

pub fn decode(cell: &str) -> Vec<OptionGroup> {
    MultiValueDecoder::new().decode(cell).unwrap()
}

/// Repository wrapper failing selected calls
pub struct FailingRepository {
    inner: InMemoryCatalog,
    fail_list_after: Option<usize>,
    fail_links: bool,
    list_calls: AtomicUsize,
}

impl FailingRepository {
    pub fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            fail_list_after: None,
            fail_links: false,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// `list` succeeds this many times, then fails
    pub fn fail_list_after(mut self, pages: usize) -> Self {
        self.fail_list_after = Some(pages);
        self
    }

    pub fn fail_configurable_links(mut self) -> Self {
        self.fail_links = true;
        self
    }
}

#[async_trait]
impl CatalogRepository for FailingRepository {
    async fn attribute_metadata(&self, entity_type: EntityType) -> Result<Vec<AttributeDescriptor>> {
        self.inner.attribute_metadata(entity_type).await
    }

    async fn store_configuration(&self) -> Result<StoreConfiguration> {
        self.inner.store_configuration().await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.inner.categories().await
    }

    async fn matching_ids(&self, filter: &FilterSpec) -> Result<Vec<ProductId>> {
        self.inner.matching_ids(filter).await
    }

    async fn list(&self, filter: &FilterSpec, page: PageRequest) -> Result<Vec<Product>> {
        let calls = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_after.is_some_and(|limit| calls >= limit) {
            return Err(DataSourceError::QueryFailed("connection reset".to_string()).into());
        }
        self.inner.list(filter, page).await
    }

    async fn stock_items(&self, ids: &[ProductId]) -> Result<BTreeMap<ProductId, StockItem>> {
        self.inner.stock_items(ids).await
    }

    async fn configurable_links(
        &self,
        ids: &[ProductId],
    ) -> Result<BTreeMap<ProductId, ConfigurableLinks>> {
        if self.fail_links {
            return Err(DataSourceError::QueryFailed("link table unavailable".to_string()).into());
        }
        self.inner.configurable_links(ids).await
    }

    async fn product_links(
        &self,
        ids: &[ProductId],
    ) -> Result<BTreeMap<ProductId, Vec<ProductLink>>> {
        self.inner.product_links(ids).await
    }

    async fn tier_prices(&self, ids: &[ProductId]) -> Result<BTreeMap<ProductId, Vec<TierPrice>>> {
        self.inner.tier_prices(ids).await
    }
}

/// Customizer whose preparation always fails
pub struct FailingCustomizer;

#[async_trait]
impl RowCustomizer for FailingCustomizer {
    fn header_columns(&self) -> Vec<String> {
        vec!["failing_column".to_string()]
    }

    async fn prepare_data(
        &mut self,
        _repository: &dyn CatalogRepository,
        _ids: &[ProductId],
    ) -> Result<()> {
        Err(ExportError::Customization("cannot load links".to_string()))
    }

    fn add_data(&self, row: ExportRow, _id: ProductId) -> ExportRow {
        row
    }
}
