//! Cell builders for computed columns

use crate::core::codec::{CompositeFormat, OptionGroup};
use crate::core::row::Cell;
use crate::domain::product::decimal;
use crate::domain::{
    AttributeDescriptor, CustomOption, ImageRole, MediaImage, PriceType, Product, StoreId,
};

/// Image columns of one scope
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaCells {
    pub base_image: String,
    pub small_image: String,
    pub thumbnail_image: String,
    pub additional_images: String,
    pub hide_from_product_page: String,
}

/// Builds the media columns; `None` is the admin scope
pub fn media_cells(product: &Product, store: Option<StoreId>) -> MediaCells {
    let images = product.sorted_images();
    let role_file = |role: ImageRole| -> String {
        images
            .iter()
            .find(|image| image.roles.contains(&role))
            .map(|image| image.file.clone())
            .unwrap_or_default()
    };

    MediaCells {
        base_image: role_file(ImageRole::Base),
        small_image: role_file(ImageRole::Small),
        thumbnail_image: role_file(ImageRole::Thumbnail),
        additional_images: join_files(images.iter().copied()),
        hide_from_product_page: hidden_images(product, store),
    }
}

/// Files hidden from the product page in a scope, joined by `,`
pub fn hidden_images(product: &Product, store: Option<StoreId>) -> String {
    join_files(
        product
            .sorted_images()
            .into_iter()
            .filter(|image| image.is_hidden_in(store)),
    )
}

fn join_files<'a>(images: impl Iterator<Item = &'a MediaImage>) -> String {
    images
        .map(|image| image.file.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Custom options cell for a scope; `None` uses admin titles
///
/// Selectable options yield one group per value; other options yield a
/// single group carrying their own price and limits.
pub fn custom_options_cell(product: &Product, store: Option<StoreId>) -> Cell {
    let mut groups = Vec::new();

    for option in product.sorted_options() {
        if option.values.is_empty() {
            groups.push(option_group(option, store));
            continue;
        }

        for value in option.sorted_values() {
            let group = option_base(option, store)
                .with("price", price(value.price))
                .with("price_type", price_type(value.price, value.price_type))
                .with("sku", value.sku.clone().unwrap_or_default())
                .with("option_title", value.title_for(store));
            groups.push(group);
        }
    }

    Cell::composite(CompositeFormat::CustomOptions, groups)
}

fn option_base(option: &CustomOption, store: Option<StoreId>) -> OptionGroup {
    OptionGroup::new()
        .with("name", option.title_for(store))
        .with("type", option.option_type.as_str())
        .with("required", if option.is_required { "1" } else { "0" })
}

fn option_group(option: &CustomOption, store: Option<StoreId>) -> OptionGroup {
    let mut group = option_base(option, store)
        .with("price", price(option.price))
        .with("price_type", price_type(option.price, option.price_type))
        .with("sku", option.sku.clone().unwrap_or_default());

    if let Some(max_characters) = option.max_characters {
        group.push("max_characters", max_characters.to_string());
    }
    if let Some(file_extension) = &option.file_extension {
        group.push("file_extension", file_extension.clone());
    }
    if let Some(x) = option.image_size_x {
        group.push("image_size_x", x.to_string());
    }
    if let Some(y) = option.image_size_y {
        group.push("image_size_y", y.to_string());
    }
    group
}

fn price(value: Option<f64>) -> String {
    value.map(decimal).unwrap_or_default()
}

fn price_type(price: Option<f64>, price_type: Option<PriceType>) -> String {
    match (price, price_type) {
        (_, Some(price_type)) => price_type.as_str().to_string(),
        (Some(_), None) => PriceType::Fixed.as_str().to_string(),
        (None, None) => String::new(),
    }
}

/// Additional attributes cell: one group of `code=value` pairs in header
/// order, skipping attributes without a value
pub fn additional_attributes_cell(
    descriptors: &[AttributeDescriptor],
    value_of: impl Fn(&AttributeDescriptor) -> Option<String>,
) -> Cell {
    let group: OptionGroup = descriptors
        .iter()
        .filter_map(|d| value_of(d).map(|value| (d.code.clone(), value)))
        .collect();

    let groups = if group.is_empty() { Vec::new() } else { vec![group] };
    Cell::composite(CompositeFormat::AdditionalAttributes, groups)
}
