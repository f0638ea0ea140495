//! Catalog product entity and its owned sub-structures
//!
//! All of these are read-only to the export engine. They are created fresh by
//! the catalog collaborator for every run and dropped when the run completes.

use super::attribute::AttributeValue;
use super::ids::{CategoryId, ProductId, StoreId, WebsiteId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Product type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Virtual,
    Configurable,
    Grouped,
    Bundle,
    Downloadable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Virtual => "virtual",
            Self::Configurable => "configurable",
            Self::Grouped => "grouped",
            Self::Bundle => "bundle",
            Self::Downloadable => "downloadable",
        }
    }

    /// Composite types link to other products
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Configurable | Self::Grouped | Self::Bundle)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    pub sku: String,

    #[serde(default)]
    pub product_type: ProductType,

    #[serde(default = "default_attribute_set")]
    pub attribute_set: String,

    #[serde(default)]
    pub website_ids: BTreeSet<WebsiteId>,

    #[serde(default)]
    pub category_ids: BTreeSet<CategoryId>,

    /// Admin-scope attribute values
    #[serde(default)]
    pub values: BTreeMap<String, AttributeValue>,

    /// Website-level overrides (price under website price scope, website-scoped attributes)
    #[serde(default)]
    pub website_values: BTreeMap<WebsiteId, BTreeMap<String, AttributeValue>>,

    /// Store-view-level overrides
    #[serde(default)]
    pub store_values: BTreeMap<StoreId, BTreeMap<String, AttributeValue>>,

    #[serde(default)]
    pub options: Vec<CustomOption>,

    #[serde(default)]
    pub images: Vec<MediaImage>,
}

fn default_attribute_set() -> String {
    "Default".to_string()
}

impl Product {
    /// Admin-scope value of an attribute
    pub fn value(&self, code: &str) -> Option<&AttributeValue> {
        self.values.get(code)
    }

    /// Website-level override of an attribute
    pub fn website_value(&self, website: WebsiteId, code: &str) -> Option<&AttributeValue> {
        self.website_values.get(&website).and_then(|v| v.get(code))
    }

    /// Store-level override of an attribute
    pub fn store_value(&self, store: StoreId, code: &str) -> Option<&AttributeValue> {
        self.store_values.get(&store).and_then(|v| v.get(code))
    }

    /// Custom options ordered by sort order, then option id
    pub fn sorted_options(&self) -> Vec<&CustomOption> {
        let mut options: Vec<&CustomOption> = self.options.iter().collect();
        options.sort_by_key(|o| (o.sort_order, o.id));
        options
    }

    /// Images ordered by gallery position
    pub fn sorted_images(&self) -> Vec<&MediaImage> {
        let mut images: Vec<&MediaImage> = self.images.iter().collect();
        images.sort_by_key(|i| (i.position, i.file.clone()));
        images
    }
}

/// Builder for [`Product`]
///
/// # Examples
///
/// ```
/// use catalog_export::domain::product::ProductBuilder;
///
/// let product = ProductBuilder::new(1, "simple")
///     .value("name", "Simple Product")
///     .value("price", "10.00")
///     .website(1)
///     .category(2)
///     .build();
///
/// assert_eq!(product.sku, "simple");
/// assert_eq!(product.website_ids.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn new(id: u64, sku: impl Into<String>) -> Self {
        Self {
            product: Product {
                id: ProductId::new(id),
                sku: sku.into(),
                product_type: ProductType::Simple,
                attribute_set: default_attribute_set(),
                website_ids: BTreeSet::new(),
                category_ids: BTreeSet::new(),
                values: BTreeMap::new(),
                website_values: BTreeMap::new(),
                store_values: BTreeMap::new(),
                options: Vec::new(),
                images: Vec::new(),
            },
        }
    }

    pub fn product_type(mut self, product_type: ProductType) -> Self {
        self.product.product_type = product_type;
        self
    }

    pub fn attribute_set(mut self, attribute_set: impl Into<String>) -> Self {
        self.product.attribute_set = attribute_set.into();
        self
    }

    pub fn website(mut self, website: u32) -> Self {
        self.product.website_ids.insert(WebsiteId::new(website));
        self
    }

    pub fn category(mut self, category: u64) -> Self {
        self.product.category_ids.insert(CategoryId::new(category));
        self
    }

    pub fn value(mut self, code: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.product.values.insert(code.into(), value.into());
        self
    }

    pub fn website_value(
        mut self,
        website: u32,
        code: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.product
            .website_values
            .entry(WebsiteId::new(website))
            .or_default()
            .insert(code.into(), value.into());
        self
    }

    pub fn store_value(
        mut self,
        store: u32,
        code: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.product
            .store_values
            .entry(StoreId::new(store))
            .or_default()
            .insert(code.into(), value.into());
        self
    }

    pub fn option(mut self, option: CustomOption) -> Self {
        self.product.options.push(option);
        self
    }

    pub fn image(mut self, image: MediaImage) -> Self {
        self.product.images.push(image);
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Custom option input type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Field,
    Area,
    File,
    DropDown,
    Radio,
    Checkbox,
    Multiple,
    Date,
    DateTime,
    Time,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Area => "area",
            Self::File => "file",
            Self::DropDown => "drop_down",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Multiple => "multiple",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Time => "time",
        }
    }

    /// Selectable options carry a list of values
    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            Self::DropDown | Self::Radio | Self::Checkbox | Self::Multiple
        )
    }
}

/// How an option price applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Fixed,
    Percent,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percent => "percent",
        }
    }
}

/// Product custom option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomOption {
    pub id: u64,
    pub title: String,
    pub option_type: OptionType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub price_type: Option<PriceType>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub max_characters: Option<u32>,
    #[serde(default)]
    pub file_extension: Option<String>,
    #[serde(default)]
    pub image_size_x: Option<u32>,
    #[serde(default)]
    pub image_size_y: Option<u32>,
    /// Per-store title overrides
    #[serde(default)]
    pub store_titles: BTreeMap<StoreId, String>,
    #[serde(default)]
    pub values: Vec<CustomOptionValue>,
}

impl CustomOption {
    pub fn new(id: u64, title: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            id,
            title: title.into(),
            option_type,
            is_required: false,
            sort_order: 0,
            price: None,
            price_type: None,
            sku: None,
            max_characters: None,
            file_extension: None,
            image_size_x: None,
            image_size_y: None,
            store_titles: BTreeMap::new(),
            values: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn priced(mut self, price: f64, price_type: PriceType) -> Self {
        self.price = Some(price);
        self.price_type = Some(price_type);
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn max_characters(mut self, max_characters: u32) -> Self {
        self.max_characters = Some(max_characters);
        self
    }

    pub fn store_title(mut self, store: u32, title: impl Into<String>) -> Self {
        self.store_titles.insert(StoreId::new(store), title.into());
        self
    }

    pub fn value(mut self, value: CustomOptionValue) -> Self {
        self.values.push(value);
        self
    }

    /// Title in effect for a store view; `None` means the admin scope
    pub fn title_for(&self, store: Option<StoreId>) -> &str {
        store
            .and_then(|s| self.store_titles.get(&s))
            .map(String::as_str)
            .unwrap_or(&self.title)
    }

    /// True if the option or any of its values has a title override for the store
    pub fn has_store_override(&self, store: StoreId) -> bool {
        self.store_titles.contains_key(&store)
            || self.values.iter().any(|v| v.store_titles.contains_key(&store))
    }

    /// Values ordered by sort order, then value id
    pub fn sorted_values(&self) -> Vec<&CustomOptionValue> {
        let mut values: Vec<&CustomOptionValue> = self.values.iter().collect();
        values.sort_by_key(|v| (v.sort_order, v.id));
        values
    }
}

/// Value of a selectable custom option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomOptionValue {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub price_type: Option<PriceType>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default)]
    pub store_titles: BTreeMap<StoreId, String>,
}

impl CustomOptionValue {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price: None,
            price_type: None,
            sku: None,
            sort_order: 0,
            store_titles: BTreeMap::new(),
        }
    }

    pub fn priced(mut self, price: f64, price_type: PriceType) -> Self {
        self.price = Some(price);
        self.price_type = Some(price_type);
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn sort_order(mut self, sort_order: u32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn store_title(mut self, store: u32, title: impl Into<String>) -> Self {
        self.store_titles.insert(StoreId::new(store), title.into());
        self
    }

    pub fn title_for(&self, store: Option<StoreId>) -> &str {
        store
            .and_then(|s| self.store_titles.get(&s))
            .map(String::as_str)
            .unwrap_or(&self.title)
    }
}

/// Inventory record of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockItem {
    pub qty: f64,
    pub min_qty: f64,
    pub use_config_min_qty: bool,
    pub is_qty_decimal: bool,
    pub backorders: u8,
    pub use_config_backorders: bool,
    pub min_sale_qty: f64,
    pub use_config_min_sale_qty: bool,
    pub max_sale_qty: f64,
    pub use_config_max_sale_qty: bool,
    pub is_in_stock: bool,
    pub notify_stock_qty: f64,
    pub use_config_notify_stock_qty: bool,
    pub manage_stock: bool,
    pub use_config_manage_stock: bool,
    pub use_config_qty_increments: bool,
    pub qty_increments: f64,
    pub use_config_enable_qty_inc: bool,
    pub enable_qty_increments: bool,
    pub is_decimal_divided: bool,
}

impl Default for StockItem {
    fn default() -> Self {
        Self {
            qty: 0.0,
            min_qty: 0.0,
            use_config_min_qty: true,
            is_qty_decimal: false,
            backorders: 0,
            use_config_backorders: true,
            min_sale_qty: 1.0,
            use_config_min_sale_qty: true,
            max_sale_qty: 10000.0,
            use_config_max_sale_qty: true,
            is_in_stock: false,
            notify_stock_qty: 1.0,
            use_config_notify_stock_qty: true,
            manage_stock: true,
            use_config_manage_stock: true,
            use_config_qty_increments: true,
            qty_increments: 1.0,
            use_config_enable_qty_inc: true,
            enable_qty_increments: false,
            is_decimal_divided: false,
        }
    }
}

impl StockItem {
    /// Stock columns, in export order
    pub const ATTRIBUTE_CODES: [&'static str; 20] = [
        "qty",
        "min_qty",
        "use_config_min_qty",
        "is_qty_decimal",
        "backorders",
        "use_config_backorders",
        "min_sale_qty",
        "use_config_min_sale_qty",
        "max_sale_qty",
        "use_config_max_sale_qty",
        "is_in_stock",
        "notify_stock_qty",
        "use_config_notify_stock_qty",
        "manage_stock",
        "use_config_manage_stock",
        "use_config_qty_increments",
        "qty_increments",
        "use_config_enable_qty_inc",
        "enable_qty_increments",
        "is_decimal_divided",
    ];

    /// In-stock record with the given quantity
    pub fn in_stock(qty: f64) -> Self {
        Self {
            qty,
            is_in_stock: true,
            ..Self::default()
        }
    }

    /// Out-of-stock record
    pub fn out_of_stock() -> Self {
        Self::default()
    }

    /// Renders one stock column; `None` for unknown codes
    pub fn render(&self, code: &str) -> Option<String> {
        let value = match code {
            "qty" => decimal(self.qty),
            "min_qty" => decimal(self.min_qty),
            "use_config_min_qty" => flag(self.use_config_min_qty),
            "is_qty_decimal" => flag(self.is_qty_decimal),
            "backorders" => self.backorders.to_string(),
            "use_config_backorders" => flag(self.use_config_backorders),
            "min_sale_qty" => decimal(self.min_sale_qty),
            "use_config_min_sale_qty" => flag(self.use_config_min_sale_qty),
            "max_sale_qty" => decimal(self.max_sale_qty),
            "use_config_max_sale_qty" => flag(self.use_config_max_sale_qty),
            "is_in_stock" => flag(self.is_in_stock),
            "notify_stock_qty" => decimal(self.notify_stock_qty),
            "use_config_notify_stock_qty" => flag(self.use_config_notify_stock_qty),
            "manage_stock" => flag(self.manage_stock),
            "use_config_manage_stock" => flag(self.use_config_manage_stock),
            "use_config_qty_increments" => flag(self.use_config_qty_increments),
            "qty_increments" => decimal(self.qty_increments),
            "use_config_enable_qty_inc" => flag(self.use_config_enable_qty_inc),
            "enable_qty_increments" => flag(self.enable_qty_increments),
            "is_decimal_divided" => flag(self.is_decimal_divided),
            _ => return None,
        };
        Some(value)
    }
}

/// Renders a decimal the way catalog storage prints it (4 fraction digits)
pub fn decimal(value: f64) -> String {
    format!("{value:.4}")
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Image role within the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    Base,
    Small,
    Thumbnail,
}

/// Media gallery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaImage {
    pub file: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub position: u32,
    /// Hidden from the product page in every scope
    #[serde(default)]
    pub disabled: bool,
    /// Store views the image is hidden in, in addition to `disabled`
    #[serde(default)]
    pub hidden_in_stores: BTreeSet<StoreId>,
    #[serde(default)]
    pub roles: BTreeSet<ImageRole>,
}

impl MediaImage {
    pub fn new(file: impl Into<String>, position: u32) -> Self {
        Self {
            file: file.into(),
            label: None,
            position,
            disabled: false,
            hidden_in_stores: BTreeSet::new(),
            roles: BTreeSet::new(),
        }
    }

    pub fn role(mut self, role: ImageRole) -> Self {
        self.roles.insert(role);
        self
    }

    pub fn hidden_in_store(mut self, store: u32) -> Self {
        self.hidden_in_stores.insert(StoreId::new(store));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Whether the image is hidden in a scope; `None` means the admin scope
    pub fn is_hidden_in(&self, store: Option<StoreId>) -> bool {
        self.disabled || store.is_some_and(|s| self.hidden_in_stores.contains(&s))
    }
}

/// Category tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// `None` for the tree root
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    pub name: String,
}

impl Category {
    pub fn new(id: u64, parent_id: Option<u64>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            parent_id: parent_id.map(CategoryId::new),
            name: name.into(),
        }
    }
}

/// Super attribute of a configurable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperAttribute {
    pub code: String,
    pub label: String,
}

/// Child of a configurable product with its super attribute values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableChild {
    pub sku: String,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Links from a configurable product to its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigurableLinks {
    #[serde(default)]
    pub attributes: Vec<SuperAttribute>,
    #[serde(default)]
    pub children: Vec<ConfigurableChild>,
}

/// Kind of product-to-product link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Related,
    Crosssell,
    Upsell,
}

impl LinkType {
    /// Every link type, in export column order
    pub const ALL: [LinkType; 3] = [Self::Related, Self::Crosssell, Self::Upsell];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Related => "related",
            Self::Crosssell => "crosssell",
            Self::Upsell => "upsell",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link from a product to another product by SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLink {
    pub link_type: LinkType,
    pub sku: String,
    #[serde(default)]
    pub position: u32,
}

impl ProductLink {
    pub fn new(link_type: LinkType, sku: impl Into<String>, position: u32) -> Self {
        Self {
            link_type,
            sku: sku.into(),
            position,
        }
    }
}

/// Tier price value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TierValueType {
    #[default]
    Fixed,
    Discount,
}

impl TierValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Discount => "discount",
        }
    }
}

/// Quantity-based price tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPrice {
    /// `None` applies to all websites
    #[serde(default)]
    pub website_id: Option<WebsiteId>,
    /// `None` applies to all customer groups
    #[serde(default)]
    pub customer_group: Option<String>,
    pub qty: f64,
    pub value: f64,
    #[serde(default)]
    pub value_type: TierValueType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_item_renders_every_code() {
        let stock = StockItem::in_stock(100.0);
        for code in StockItem::ATTRIBUTE_CODES {
            let value = stock.render(code).unwrap();
            assert!(!value.is_empty(), "{code} rendered empty");
        }
        assert_eq!(stock.render("qty").as_deref(), Some("100.0000"));
        assert_eq!(stock.render("is_in_stock").as_deref(), Some("1"));
        assert_eq!(stock.render("unknown"), None);
    }

    #[test]
    fn test_stock_item_default_is_out_of_stock() {
        let stock = StockItem::default();
        assert!(!stock.is_in_stock);
        assert_eq!(stock, StockItem::out_of_stock());
    }

    #[test]
    fn test_option_title_for_store() {
        let option = CustomOption::new(1, "Color", OptionType::DropDown).store_title(1, "Couleur");

        assert_eq!(option.title_for(None), "Color");
        assert_eq!(option.title_for(Some(StoreId::new(1))), "Couleur");
        assert_eq!(option.title_for(Some(StoreId::new(2))), "Color");
    }

    #[test]
    fn test_option_store_override_detects_value_titles() {
        let option = CustomOption::new(1, "Color", OptionType::DropDown)
            .value(CustomOptionValue::new(10, "Red").store_title(2, "Rouge"));

        assert!(option.has_store_override(StoreId::new(2)));
        assert!(!option.has_store_override(StoreId::new(1)));
    }

    #[test]
    fn test_sorted_options_and_values() {
        let product = ProductBuilder::new(1, "simple")
            .option(CustomOption::new(5, "Second", OptionType::Field).sort_order(2))
            .option(
                CustomOption::new(3, "First", OptionType::Radio)
                    .sort_order(1)
                    .value(CustomOptionValue::new(2, "b").sort_order(2))
                    .value(CustomOptionValue::new(1, "a").sort_order(1)),
            )
            .build();

        let options = product.sorted_options();
        assert_eq!(options[0].title, "First");
        assert_eq!(options[1].title, "Second");
        let values: Vec<&str> = options[0]
            .sorted_values()
            .iter()
            .map(|v| v.title.as_str())
            .collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_image_hidden_scopes() {
        let image = MediaImage::new("/m/a/magento_image.jpg", 1).hidden_in_store(1);
        assert!(!image.is_hidden_in(None));
        assert!(image.is_hidden_in(Some(StoreId::new(1))));

        let disabled = MediaImage::new("/a.jpg", 1).disabled();
        assert!(disabled.is_hidden_in(None));
        assert!(disabled.is_hidden_in(Some(StoreId::new(5))));
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 1,
                "sku": "simple",
                "values": {"name": "Simple Product", "color": ["Red", "Blue"]},
                "website_values": {"2": {"price": "9.99"}},
                "store_values": {"1": {"name": "Produit"}}
            }"#,
        )
        .unwrap();

        assert_eq!(product.product_type, ProductType::Simple);
        assert_eq!(product.attribute_set, "Default");
        assert_eq!(
            product.website_value(WebsiteId::new(2), "price"),
            Some(&AttributeValue::from("9.99"))
        );
        assert_eq!(
            product.store_value(StoreId::new(1), "name"),
            Some(&AttributeValue::from("Produit"))
        );
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(decimal(10.0), "10.0000");
        assert_eq!(decimal(9.99), "9.9900");
    }
}
