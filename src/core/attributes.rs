//! Attribute catalog and export header
//!
//! The header is built once per run: fixed leading columns, then the
//! system attributes reported by the catalog, the media columns, the
//! additional attributes cell, the stock columns, the custom options cell
//! and finally any customizer columns.

use crate::adapters::catalog::CatalogRepository;
use crate::core::row::STORE_VIEW_CODE;
use crate::domain::{
    AttributeDescriptor, AttributeScope, EntityType, ExportError, PriceScope, Result, StockItem,
};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const SKU: &str = "sku";
pub const PRODUCT_TYPE: &str = "product_type";
pub const ATTRIBUTE_SET_CODE: &str = "attribute_set_code";
pub const CATEGORIES: &str = "categories";
pub const PRODUCT_WEBSITES: &str = "product_websites";

pub const BASE_IMAGE: &str = "base_image";
pub const SMALL_IMAGE: &str = "small_image";
pub const THUMBNAIL_IMAGE: &str = "thumbnail_image";
pub const ADDITIONAL_IMAGES: &str = "additional_images";
pub const HIDE_FROM_PRODUCT_PAGE: &str = "hide_from_product_page";

pub const ADDITIONAL_ATTRIBUTES: &str = "additional_attributes";
pub const CUSTOM_OPTIONS: &str = "custom_options";

/// Columns every product row starts with
pub const LEADING_COLUMNS: [&str; 6] = [
    SKU,
    STORE_VIEW_CODE,
    PRODUCT_TYPE,
    ATTRIBUTE_SET_CODE,
    CATEGORIES,
    PRODUCT_WEBSITES,
];

/// Media gallery columns
pub const MEDIA_COLUMNS: [&str; 5] = [
    BASE_IMAGE,
    SMALL_IMAGE,
    THUMBNAIL_IMAGE,
    ADDITIONAL_IMAGES,
    HIDE_FROM_PRODUCT_PAGE,
];

/// Attributes whose scope follows the catalog price scope
pub const PRICE_ATTRIBUTES: [&str; 3] = ["price", "special_price", "cost"];

const RESERVED_CHARACTERS: [char; 4] = [',', '|', '=', '"'];

/// Ordered header of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHeader {
    entity_type: EntityType,
    price_scope: PriceScope,
    columns: Vec<String>,
    attributes: Vec<AttributeDescriptor>,
    additional: Vec<AttributeDescriptor>,
}

impl ExportHeader {
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Price scope in effect when the header was built
    pub fn price_scope(&self) -> PriceScope {
        self.price_scope
    }

    /// Column names in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Attributes with a dedicated column, in column order
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// User-defined attributes folded into the additional attributes cell
    pub fn additional_attributes(&self) -> &[AttributeDescriptor] {
        &self.additional
    }

    /// Looks up a catalog attribute (system or additional) by code
    pub fn attribute(&self, code: &str) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .chain(self.additional.iter())
            .find(|d| d.code == code)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Appends customizer columns
    ///
    /// # Errors
    ///
    /// Returns a schema error if a column is invalid or already present.
    pub fn append_columns(&mut self, columns: Vec<String>) -> Result<()> {
        for column in columns {
            validate_code(&column)?;
            if self.has_column(&column) {
                return Err(ExportError::Schema(format!(
                    "Customizer column '{}' collides with an existing column",
                    column
                )));
            }
            self.columns.push(column);
        }
        Ok(())
    }
}

/// Resolves exportable attributes per entity type
pub struct AttributeCatalog {
    repository: Arc<dyn CatalogRepository>,
}

impl AttributeCatalog {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Builds the header for an entity type
    ///
    /// Reads attribute metadata and the current price scope from the
    /// catalog. Price attributes take the price scope instead of their
    /// declared scope. Exact duplicate declarations are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Schema`] if a code is declared twice with
    /// different properties, is empty or contains a reserved character, or
    /// collides with a fixed column. Catalog read failures surface as
    /// [`ExportError::DataSource`].
    pub async fn build_header(&self, entity_type: EntityType) -> Result<ExportHeader> {
        let metadata = self.repository.attribute_metadata(entity_type).await?;
        let price_scope = self.repository.store_configuration().await?.price_scope;

        let mut seen: BTreeMap<String, AttributeDescriptor> = BTreeMap::new();
        let mut attributes = Vec::new();
        let mut additional = Vec::new();

        for descriptor in metadata {
            validate_code(&descriptor.code)?;
            if is_fixed_column(&descriptor.code) {
                return Err(ExportError::Schema(format!(
                    "Attribute '{}' collides with a fixed column",
                    descriptor.code
                )));
            }

            if let Some(previous) = seen.get(&descriptor.code) {
                if previous != &descriptor {
                    return Err(ExportError::Schema(format!(
                        "Attribute '{}' declared inconsistently: {:?} scope vs {:?} scope",
                        descriptor.code, previous.scope, descriptor.scope
                    )));
                }
                continue;
            }
            seen.insert(descriptor.code.clone(), descriptor.clone());

            let effective = apply_price_scope(descriptor, price_scope);
            if effective.user_defined {
                additional.push(effective);
            } else {
                attributes.push(effective);
            }
        }

        let mut columns: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(attributes.iter().map(|d| d.code.clone()));
        columns.extend(MEDIA_COLUMNS.iter().map(|c| c.to_string()));
        columns.push(ADDITIONAL_ATTRIBUTES.to_string());
        columns.extend(StockItem::ATTRIBUTE_CODES.iter().map(|c| c.to_string()));
        columns.push(CUSTOM_OPTIONS.to_string());

        tracing::debug!(
            entity_type = %entity_type,
            columns = columns.len(),
            additional = additional.len(),
            price_scope = ?price_scope,
            "Built export header"
        );

        Ok(ExportHeader {
            entity_type,
            price_scope,
            columns,
            attributes,
            additional,
        })
    }
}

fn apply_price_scope(mut descriptor: AttributeDescriptor, price_scope: PriceScope) -> AttributeDescriptor {
    if PRICE_ATTRIBUTES.contains(&descriptor.code.as_str()) {
        descriptor.scope = match price_scope {
            PriceScope::Global => AttributeScope::Global,
            PriceScope::Website => AttributeScope::Website,
        };
    }
    descriptor
}

fn is_fixed_column(code: &str) -> bool {
    LEADING_COLUMNS.contains(&code)
        || MEDIA_COLUMNS.contains(&code)
        || StockItem::ATTRIBUTE_CODES.contains(&code)
        || code == ADDITIONAL_ATTRIBUTES
        || code == CUSTOM_OPTIONS
}

fn validate_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(ExportError::Schema("Attribute code cannot be empty".to_string()));
    }
    if code.contains(RESERVED_CHARACTERS) {
        return Err(ExportError::Schema(format!(
            "Attribute code '{}' contains a reserved character",
            code
        )));
    }
    Ok(())
}
