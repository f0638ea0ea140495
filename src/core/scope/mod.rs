//! Scope expansion
//!
//! Each entity yields a default row (`store_view_code` empty) followed by
//! one row per store view whose values differ from the default. Store rows
//! are full copies of the default row with the differing cells replaced.

pub mod columns;

use crate::core::attributes::{
    ExportHeader, ADDITIONAL_ATTRIBUTES, ADDITIONAL_IMAGES, ATTRIBUTE_SET_CODE, BASE_IMAGE,
    CATEGORIES, CUSTOM_OPTIONS, HIDE_FROM_PRODUCT_PAGE, PRODUCT_TYPE, PRODUCT_WEBSITES, SKU,
    SMALL_IMAGE, THUMBNAIL_IMAGE,
};
use crate::core::cursor::CatalogEntity;
use crate::core::row::{Cell, ExportRow, STORE_VIEW_CODE};
use crate::domain::{
    AttributeDescriptor, AttributeScope, AttributeValue, Product, StockItem, Store,
    StoreConfiguration,
};
use columns::{additional_attributes_cell, custom_options_cell, hidden_images, media_cells};

const MULTI_SELECT_SEPARATOR: &str = "|";

/// Expands entities into scoped rows
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'a> {
    header: &'a ExportHeader,
    stores: &'a StoreConfiguration,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(header: &'a ExportHeader, stores: &'a StoreConfiguration) -> Self {
        Self { header, stores }
    }

    /// Default row first, then store rows in store id order
    ///
    /// Only store views of websites the product is assigned to are
    /// considered. Attribute scopes come from the header, so price
    /// attributes follow the price scope the header was built with.
    pub fn expand(&self, entity: &CatalogEntity) -> Vec<ExportRow> {
        let product = &entity.product;
        let default_row = self.default_row(entity);
        let mut rows = Vec::new();

        for store in self.stores.store_views() {
            if !product.website_ids.contains(&store.website_id) {
                continue;
            }

            let overrides = self.store_overrides(product, store, &default_row);
            if overrides.is_empty() {
                continue;
            }

            let mut row = default_row.clone();
            row.set(STORE_VIEW_CODE, store.code.as_str());
            for (column, cell) in overrides {
                row.set(column, cell);
            }
            rows.push(row);
        }

        tracing::trace!(
            sku = %product.sku,
            store_rows = rows.len(),
            "Expanded entity scopes"
        );

        rows.insert(0, default_row);
        rows
    }

    fn default_row(&self, entity: &CatalogEntity) -> ExportRow {
        let product = &entity.product;
        let mut row = ExportRow::new();

        row.set(SKU, product.sku.as_str());
        row.set(STORE_VIEW_CODE, "");
        row.set(PRODUCT_TYPE, product.product_type.as_str());
        row.set(ATTRIBUTE_SET_CODE, product.attribute_set.as_str());
        row.set(CATEGORIES, entity.category_paths.join(","));
        row.set(PRODUCT_WEBSITES, self.website_codes(product));

        for descriptor in self.header.attributes() {
            row.set(descriptor.code.as_str(), render(product.value(&descriptor.code)));
        }

        let media = media_cells(product, None);
        row.set(BASE_IMAGE, media.base_image);
        row.set(SMALL_IMAGE, media.small_image);
        row.set(THUMBNAIL_IMAGE, media.thumbnail_image);
        row.set(ADDITIONAL_IMAGES, media.additional_images);
        row.set(HIDE_FROM_PRODUCT_PAGE, media.hide_from_product_page);

        row.set(
            ADDITIONAL_ATTRIBUTES,
            additional_attributes_cell(self.header.additional_attributes(), |d| {
                additional_value(d, product.value(&d.code))
            }),
        );

        for code in StockItem::ATTRIBUTE_CODES {
            row.set(code, entity.stock.render(code).unwrap_or_default());
        }

        row.set(CUSTOM_OPTIONS, custom_options_cell(product, None));
        row
    }

    fn store_overrides(
        &self,
        product: &Product,
        store: &Store,
        default_row: &ExportRow,
    ) -> Vec<(String, Cell)> {
        let mut overrides = Vec::new();

        for descriptor in self.header.attributes() {
            if !descriptor.scope.is_scoped() {
                continue;
            }
            let value = render(scoped_value(product, descriptor, store));
            if default_row.text(&descriptor.code) != Some(value.as_str()) {
                overrides.push((descriptor.code.clone(), Cell::Text(value)));
            }
        }

        let additional = self.header.additional_attributes();
        if additional.iter().any(|d| d.scope.is_scoped()) {
            let cell = additional_attributes_cell(additional, |d| {
                additional_value(d, scoped_value(product, d, store))
            });
            if default_row.get(ADDITIONAL_ATTRIBUTES) != Some(&cell) {
                overrides.push((ADDITIONAL_ATTRIBUTES.to_string(), cell));
            }
        }

        let hidden = hidden_images(product, Some(store.id));
        if default_row.text(HIDE_FROM_PRODUCT_PAGE) != Some(hidden.as_str()) {
            overrides.push((HIDE_FROM_PRODUCT_PAGE.to_string(), Cell::Text(hidden)));
        }

        if product.options.iter().any(|o| o.has_store_override(store.id)) {
            let cell = custom_options_cell(product, Some(store.id));
            if default_row.get(CUSTOM_OPTIONS) != Some(&cell) {
                overrides.push((CUSTOM_OPTIONS.to_string(), cell));
            }
        }

        overrides
    }

    fn website_codes(&self, product: &Product) -> String {
        product
            .website_ids
            .iter()
            .filter_map(|id| {
                let code = self.stores.website_code(*id);
                if code.is_none() {
                    tracing::warn!(sku = %product.sku, website_id = %id, "Unknown website");
                }
                code
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Value in effect for a store view, falling back store → website → admin
fn scoped_value<'p>(
    product: &'p Product,
    descriptor: &AttributeDescriptor,
    store: &Store,
) -> Option<&'p AttributeValue> {
    let code = descriptor.code.as_str();
    match descriptor.scope {
        AttributeScope::Global => product.value(code),
        AttributeScope::Website => product
            .website_value(store.website_id, code)
            .or_else(|| product.value(code)),
        AttributeScope::Store => product
            .store_value(store.id, code)
            .or_else(|| product.website_value(store.website_id, code))
            .or_else(|| product.value(code)),
    }
}

fn render(value: Option<&AttributeValue>) -> String {
    value.map(AttributeValue::render).unwrap_or_default()
}

/// Values of multi-select attributes inside the additional attributes cell
/// are joined with `|`, keeping `,` free for the pair separator
fn additional_value(
    descriptor: &AttributeDescriptor,
    value: Option<&AttributeValue>,
) -> Option<String> {
    let rendered = match value? {
        AttributeValue::Multi(values) if descriptor.multi_valued => {
            values.join(MULTI_SELECT_SEPARATOR)
        }
        other => other.render(),
    };
    Some(rendered).filter(|v| !v.is_empty())
}
