//! Integration tests for the export engine

mod common;

use catalog_export::adapters::catalog::InMemoryCatalog;
use catalog_export::adapters::writer::{CsvSink, RowSink};
use catalog_export::core::customizer::TierPriceCustomizer;
use catalog_export::core::export::{
    EngineConfig, EngineState, ExportEngine, RawExportParameters,
};
use catalog_export::core::verification::content_checksum;
use catalog_export::domain::{
    AttributeDescriptor, AttributeScope, ConfigurableChild, ConfigurableLinks, CustomOption,
    CustomOptionValue, ExportError, ImageRole, LinkType, MediaImage, OptionType, PriceScope,
    ProductBuilder, ProductId, ProductLink, ProductType, StockItem, SuperAttribute, WebsiteId,
};
use common::*;
use std::sync::Arc;

#[tokio::test]
async fn test_header_layout() {
    let catalog = catalog();
    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let header = &outcome.artifact.header;

    assert_eq!(
        &header[..6],
        &[
            "sku",
            "store_view_code",
            "product_type",
            "attribute_set_code",
            "categories",
            "product_websites"
        ]
    );
    assert!(header.contains(&"name".to_string()));
    assert!(!header.contains(&"color".to_string()));

    let qty = header.iter().position(|c| c == "qty").unwrap();
    assert_eq!(header[qty + 19], "is_decimal_divided");
    assert_eq!(header[qty + 20], "custom_options");
    assert_eq!(
        &header[header.len() - 3..],
        &[
            "configurable_variations",
            "configurable_variation_labels",
            "tier_prices"
        ]
    );
}

#[tokio::test]
async fn test_multiple_options_yield_one_default_row() {
    let catalog = catalog();
    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    assert!(outcome.is_successful());

    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, MULTI_OPTION_SKU);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["store_view_code"], "");

    let groups = decode(&rows[0]["custom_options"]);
    assert_eq!(groups.len(), 6);
    assert_eq!(groups[0].get("name"), Some("Test Select"));
    assert_eq!(groups[0].get("type"), Some("drop_down"));
    assert_eq!(groups[0].get("required"), Some("1"));
    assert_eq!(groups[0].get("option_title"), Some("Option 1"));
    assert_eq!(groups[0].get("price"), Some("1.0000"));
    assert_eq!(groups[5].get("name"), Some("Test Radio"));
    assert_eq!(groups[5].get("sku"), Some("test-radio-3"));
}

#[tokio::test]
async fn test_every_row_has_every_column() {
    let catalog = catalog();
    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let width = outcome.artifact.header.len();

    let mut reader = csv::Reader::from_reader(outcome.artifact.contents.as_bytes());
    for record in reader.records() {
        assert_eq!(record.unwrap().len(), width);
    }
    assert_eq!(outcome.artifact.row_count, 4);
}

#[tokio::test]
async fn test_stock_columns_and_additional_attributes() {
    let catalog = catalog();
    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);

    let row = rows_for(&records, MULTI_OPTION_SKU)[0];
    assert_eq!(row["qty"], "100.0000");
    assert_eq!(row["is_in_stock"], "1");
    assert_eq!(row["additional_attributes"], "color=red");
    assert_eq!(row["categories"], "Default Category/Category 1");
    assert_eq!(row["product_websites"], "base");

    let out = rows_for(&records, OUT_OF_STOCK_SKU)[0];
    assert_eq!(out["is_in_stock"], "0");
    assert_eq!(out["categories"], "Default Category");
}

#[tokio::test]
async fn test_missing_stock_record_exports_defaults() {
    let catalog = catalog();
    catalog.upsert_product(product(9, "no_stock")).await;

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let row = rows_for(&records, "no_stock")[0];

    for code in StockItem::ATTRIBUTE_CODES {
        assert!(!row[code].is_empty(), "stock column {code} is empty");
    }
    assert_eq!(row["is_in_stock"], "0");
    assert_eq!(row["max_sale_qty"], "10000.0000");
}

#[tokio::test]
async fn test_broken_category_path_does_not_abort() {
    let catalog = catalog();
    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    assert!(outcome.is_successful());

    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, BROKEN_CATEGORY_SKU);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["categories"], "");
}

#[tokio::test]
async fn test_website_price_under_website_scope() {
    let catalog = catalog();
    catalog.set_price_scope(PriceScope::Website).await;
    assert!(catalog.assign_website(UNCATEGORIZED_SKU, WebsiteId::new(2)).await);
    assert!(
        catalog
            .set_website_value(UNCATEGORIZED_SKU, WebsiteId::new(2), "price", "9.99")
            .await
    );

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, UNCATEGORIZED_SKU);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["store_view_code"], "");
    assert_eq!(rows[0]["price"], "30");
    assert_eq!(rows[0]["product_websites"], "base,test");
    assert_eq!(rows[1]["store_view_code"], SECOND_STORE);
    assert_eq!(rows[1]["price"], "9.99");
}

#[tokio::test]
async fn test_website_price_ignored_under_global_scope() {
    let catalog = catalog();
    catalog.assign_website(UNCATEGORIZED_SKU, WebsiteId::new(2)).await;
    catalog
        .set_website_value(UNCATEGORIZED_SKU, WebsiteId::new(2), "price", "9.99")
        .await;

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, UNCATEGORIZED_SKU);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["price"], "30");
}

#[tokio::test]
async fn test_store_row_is_superset_of_default_row() {
    let catalog = catalog();
    catalog
        .set_store_value(MULTI_OPTION_SKU, catalog_export::domain::StoreId::new(1), "name", "Store Name")
        .await;

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, MULTI_OPTION_SKU);

    assert_eq!(rows.len(), 2);
    let (default_row, store_row) = (rows[0], rows[1]);
    assert_eq!(store_row["store_view_code"], "default");
    assert_eq!(store_row["name"], "Store Name");
    for (column, value) in default_row {
        if column != "store_view_code" && column != "name" {
            assert_eq!(&store_row[column], value, "column {column} differs");
        }
    }
}

#[tokio::test]
async fn test_store_option_titles_produce_store_row() {
    let catalog = catalog();
    catalog
        .upsert_product(
            ProductBuilder::new(20, "titled")
                .website(1)
                .option(
                    CustomOption::new(1, "Size", OptionType::Radio)
                        .store_title(1, "Grösse")
                        .value(CustomOptionValue::new(1, "Small").store_title(1, "Klein")),
                )
                .build(),
        )
        .await;

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, "titled");

    assert_eq!(rows.len(), 2);
    let default_groups = decode(&rows[0]["custom_options"]);
    let store_groups = decode(&rows[1]["custom_options"]);
    assert_eq!(default_groups[0].get("name"), Some("Size"));
    assert_eq!(store_groups[0].get("name"), Some("Grösse"));
    assert_eq!(store_groups[0].get("option_title"), Some("Klein"));
}

#[tokio::test]
async fn test_hidden_image_in_store_produces_store_row() {
    let catalog = catalog();
    catalog
        .upsert_product(
            ProductBuilder::new(21, "imaged")
                .website(1)
                .image(MediaImage::new("/m/a/magento_image.jpg", 1).role(ImageRole::Base))
                .image(MediaImage::new("/m/a/magento_thumb.jpg", 2).hidden_in_store(1))
                .build(),
        )
        .await;

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let rows = rows_for(&records, "imaged");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["base_image"], "/m/a/magento_image.jpg");
    assert_eq!(
        rows[0]["additional_images"],
        "/m/a/magento_image.jpg,/m/a/magento_thumb.jpg"
    );
    assert_eq!(rows[0]["hide_from_product_page"], "");
    assert_eq!(rows[1]["hide_from_product_page"], "/m/a/magento_thumb.jpg");
}

#[tokio::test]
async fn test_configurable_variations_column() {
    let mut snapshot = snapshot();
    snapshot.products.push(
        ProductBuilder::new(30, "configurable")
            .product_type(ProductType::Configurable)
            .website(1)
            .build(),
    );
    snapshot.configurable_links.insert(
        ProductId::new(30),
        ConfigurableLinks {
            attributes: vec![SuperAttribute {
                code: "test_configurable".to_string(),
                label: "Test Configurable".to_string(),
            }],
            children: vec![
                ConfigurableChild {
                    sku: "simple_10".to_string(),
                    values: [("test_configurable".to_string(), "Option 1".to_string())].into(),
                },
                ConfigurableChild {
                    sku: "simple_20".to_string(),
                    values: [("test_configurable".to_string(), "Option 2".to_string())].into(),
                },
            ],
        },
    );

    let catalog = InMemoryCatalog::new(snapshot);
    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    let row = rows_for(&records, "configurable")[0];

    assert_eq!(row["product_type"], "configurable");
    assert_eq!(
        row["configurable_variations"],
        "sku=simple_10,test_configurable=Option 1|sku=simple_20,test_configurable=Option 2"
    );
    assert_eq!(
        row["configurable_variation_labels"],
        "test_configurable=Test Configurable"
    );
    assert_eq!(rows_for(&records, MULTI_OPTION_SKU)[0]["configurable_variations"], "");
}

#[tokio::test]
async fn test_product_links_columns() {
    let mut snapshot = snapshot();
    snapshot.product_links.insert(
        ProductId::new(1),
        vec![
            ProductLink::new(LinkType::Upsell, BROKEN_CATEGORY_SKU, 1),
            ProductLink::new(LinkType::Related, UNCATEGORIZED_SKU, 2),
            ProductLink::new(LinkType::Related, OUT_OF_STOCK_SKU, 1),
            ProductLink::new(LinkType::Crosssell, UNCATEGORIZED_SKU, 0),
        ],
    );
    let catalog = InMemoryCatalog::new(snapshot);

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    assert!(outcome.is_successful());
    for column in ["related_skus", "crosssell_position", "upsell_skus"] {
        assert!(outcome.artifact.header.contains(&column.to_string()));
    }

    let records = records(&outcome.artifact.contents);
    let row = rows_for(&records, MULTI_OPTION_SKU)[0];
    assert_eq!(row["related_skus"], format!("{OUT_OF_STOCK_SKU},{UNCATEGORIZED_SKU}"));
    assert_eq!(row["related_position"], "1,2");
    assert_eq!(row["crosssell_skus"], UNCATEGORIZED_SKU);
    assert_eq!(row["crosssell_position"], "0");
    assert_eq!(row["upsell_skus"], BROKEN_CATEGORY_SKU);
    assert_eq!(row["upsell_position"], "1");

    let unlinked = rows_for(&records, UNCATEGORIZED_SKU)[0];
    assert_eq!(unlinked["related_skus"], "");
    assert_eq!(unlinked["upsell_position"], "");
}

#[tokio::test]
async fn test_changes_before_export_are_visible() {
    let catalog = catalog();
    let mut engine = engine(&catalog);

    let before = engine.export(&RawExportParameters::new()).await;
    catalog.set_price_scope(PriceScope::Website).await;
    catalog.assign_website(OUT_OF_STOCK_SKU, WebsiteId::new(2)).await;
    catalog
        .set_website_value(OUT_OF_STOCK_SKU, WebsiteId::new(2), "price", "15")
        .await;
    let after = engine.export(&RawExportParameters::new()).await;

    assert_eq!(before.artifact.row_count + 1, after.artifact.row_count);
}

#[tokio::test]
async fn test_row_order_independent_of_paging() {
    let catalog = catalog();
    let reference = engine(&catalog).export(&RawExportParameters::new()).await;

    for (page_size, prefetch_depth) in [(1, 0), (1, 3), (2, 1), (3, 0)] {
        let mut engine = ExportEngine::new(
            Arc::new(catalog.clone()),
            EngineConfig {
                page_size,
                prefetch_depth,
            },
        );
        let outcome = engine.export(&RawExportParameters::new()).await;
        assert_eq!(outcome.artifact.contents, reference.artifact.contents);
        assert_eq!(outcome.summary.batches, 4usize.div_ceil(page_size));
    }
}

#[tokio::test]
async fn test_fields_enclosure_changes_quoting_only() {
    let catalog = catalog();
    let plain = engine(&catalog).export(&RawExportParameters::new()).await;
    let enclosed = engine(&catalog)
        .export(&RawExportParameters::new().fields_enclosure(true))
        .await;

    assert!(enclosed.artifact.contents.starts_with("\"sku\",\"store_view_code\""));
    assert!(plain.artifact.contents.starts_with("sku,store_view_code"));

    let plain_records = records(&plain.artifact.contents);
    let enclosed_records = records(&enclosed.artifact.contents);
    assert_eq!(plain_records.len(), enclosed_records.len());
    for (a, b) in plain_records.iter().zip(enclosed_records.iter()) {
        assert_eq!(decode(&a["custom_options"]), decode(&b["custom_options"]));
        assert_eq!(a["name"], b["name"]);
    }
}

#[tokio::test]
async fn test_enclosure_setting_without_composites_keeps_content() {
    let catalog = InMemoryCatalog::new(catalog_export::adapters::catalog::CatalogSnapshot {
        attributes: vec![AttributeDescriptor::new("name")],
        products: vec![ProductBuilder::new(1, "plain").value("name", "Plain, Simple").build()],
        ..Default::default()
    });
    let mut engine = ExportEngine::new(Arc::new(catalog), EngineConfig::default())
        .without_customizers();

    let plain = engine.export(&RawExportParameters::new()).await;
    let enclosed = engine
        .export(&RawExportParameters::new().fields_enclosure(true))
        .await;

    assert_ne!(plain.artifact.contents, enclosed.artifact.contents);
    assert_eq!(
        content_checksum(&plain.artifact.contents).unwrap(),
        content_checksum(&enclosed.artifact.contents).unwrap()
    );
}

#[tokio::test]
async fn test_customizer_failure_returns_empty_artifact() {
    let catalog = catalog();
    let mut engine = engine(&catalog).with_customizer(Box::new(FailingCustomizer));
    let outcome = engine.export(&RawExportParameters::new()).await;

    assert!(outcome.artifact.is_empty());
    assert!(outcome.artifact.header.is_empty());
    assert_eq!(engine.state(), EngineState::Failed);
    assert_eq!(outcome.summary.failure.as_ref().unwrap().kind, "customization");
    assert!(outcome.summary.checksum.is_none());
}

#[tokio::test]
async fn test_customizer_data_source_failure_is_customization_error() {
    let repository = FailingRepository::new(catalog()).fail_configurable_links();
    let mut engine = ExportEngine::new(Arc::new(repository), EngineConfig::default());

    let mut sink = CsvSink::new(Vec::new(), false);
    let result = engine.export_to(&RawExportParameters::new(), &mut sink).await;

    assert!(matches!(result, Err(ExportError::Customization(_))));
    assert!(sink.into_inner().is_err());
}

#[tokio::test]
async fn test_data_source_failure_mid_stream_discards_rows() {
    for prefetch_depth in [0, 2] {
        let repository = FailingRepository::new(catalog()).fail_list_after(1);
        let mut engine = ExportEngine::new(
            Arc::new(repository),
            EngineConfig {
                page_size: 1,
                prefetch_depth,
            },
        );

        let outcome = engine.export(&RawExportParameters::new()).await;
        assert!(outcome.artifact.is_empty());
        assert_eq!(outcome.artifact.row_count, 0);
        assert_eq!(outcome.summary.failure.as_ref().unwrap().kind, "data_source");
        assert_eq!(engine.state(), EngineState::Failed);
    }
}

#[tokio::test]
async fn test_streaming_sink_is_aborted_on_failure() {
    let repository = FailingRepository::new(catalog()).fail_list_after(2);
    let mut engine = ExportEngine::new(
        Arc::new(repository),
        EngineConfig {
            page_size: 1,
            prefetch_depth: 0,
        },
    );

    let mut sink = CsvSink::new(Vec::new(), false);
    let result = engine.export_to(&RawExportParameters::new(), &mut sink).await;

    assert!(matches!(result, Err(ExportError::DataSource(_))));
    assert_eq!(sink.rows_written(), 2);
    assert!(sink.write_row(&[]).is_err());
}

#[tokio::test]
async fn test_inconsistent_metadata_is_schema_error() {
    let mut snapshot = snapshot();
    snapshot
        .attributes
        .push(AttributeDescriptor::new("name").with_scope(AttributeScope::Global));
    let catalog = InMemoryCatalog::new(snapshot);

    let outcome = engine(&catalog).export(&RawExportParameters::new()).await;
    assert!(outcome.artifact.is_empty());
    assert_eq!(outcome.summary.failure.as_ref().unwrap().kind, "schema");
}

#[tokio::test]
async fn test_tier_prices_column() {
    let mut snapshot = snapshot();
    snapshot.tier_prices.insert(
        ProductId::new(3),
        vec![catalog_export::domain::TierPrice {
            website_id: Some(WebsiteId::new(1)),
            customer_group: None,
            qty: 5.0,
            value: 25.0,
            value_type: catalog_export::domain::TierValueType::Fixed,
        }],
    );
    let catalog = InMemoryCatalog::new(snapshot);
    let mut engine = ExportEngine::new(Arc::new(catalog), EngineConfig::default())
        .without_customizers()
        .with_customizer(Box::new(TierPriceCustomizer::new()));

    let outcome = engine.export(&RawExportParameters::new()).await;
    let records = records(&outcome.artifact.contents);
    assert_eq!(
        rows_for(&records, UNCATEGORIZED_SKU)[0]["tier_prices"],
        "website=base,customer_group=all,qty=5.0000,price=25.0000,value_type=fixed"
    );
    assert!(!outcome.artifact.header.contains(&"configurable_variations".to_string()));
}
