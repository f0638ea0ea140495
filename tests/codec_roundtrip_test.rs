//! Composite cell round trips through the CSV layer

mod common;

use catalog_export::adapters::writer::{CsvSink, RowSink};
use catalog_export::core::codec::{
    CompositeFormat, Enclosure, MultiValueDecoder, MultiValueEncoder, OptionGroup,
};
use catalog_export::core::export::RawExportParameters;
use catalog_export::domain::{CustomOption, CustomOptionValue, OptionType, ProductBuilder};
use common::*;
use proptest::prelude::*;

const ADVERSARIAL: &str = r#"Option "quoted" & co, a|b = c"#;

fn groups() -> Vec<OptionGroup> {
    vec![
        OptionGroup::new()
            .with("name", "Test Select")
            .with("type", "drop_down")
            .with("option_title", "Option 1"),
        OptionGroup::new()
            .with("name", "Test Field")
            .with("type", "field")
            .with("price", ""),
    ]
}

fn write_and_read(cell: &str, fields_enclosure: bool) -> String {
    let mut sink = CsvSink::new(Vec::new(), fields_enclosure);
    sink.write_header(&["custom_options".to_string()]).unwrap();
    sink.write_row(&[cell.to_string()]).unwrap();
    let bytes = sink.into_inner().unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let record = reader.records().next().unwrap().unwrap();
    record[0].to_string()
}

#[test]
fn test_plain_groups_round_trip() {
    for enclosure in [Enclosure::Minimal, Enclosure::Always] {
        let encoder = MultiValueEncoder::new(enclosure);
        let cell = encoder.encode(&groups()).unwrap();
        assert_eq!(MultiValueDecoder::new().decode(&cell).unwrap(), groups());
    }
}

#[test]
fn test_adversarial_text_survives_csv_layer() {
    let groups = vec![OptionGroup::new()
        .with("name", ADVERSARIAL)
        .with("option_title", ADVERSARIAL)];

    for (enclosure, fields_enclosure) in [(Enclosure::Minimal, false), (Enclosure::Always, true)] {
        let cell = MultiValueEncoder::new(enclosure).encode(&groups).unwrap();
        let read_back = write_and_read(&cell, fields_enclosure);
        assert_eq!(read_back, cell);
        assert_eq!(MultiValueDecoder::new().decode(&read_back).unwrap(), groups);
    }
}

#[test]
fn test_csv_doubles_embedded_quotes() {
    let cell = MultiValueEncoder::default()
        .encode(&[OptionGroup::new().with("name", "say \"hi\"")])
        .unwrap();
    assert_eq!(cell, "name=say \"hi\"");

    let mut sink = CsvSink::new(Vec::new(), false);
    sink.write_header(&["custom_options".to_string()]).unwrap();
    sink.write_row(&[cell]).unwrap();
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(text, "custom_options\n\"name=say \"\"hi\"\"\"\n");
}

#[test]
fn test_missing_required_key_is_explicit() {
    let groups = vec![OptionGroup::new().with("type", "field")];
    assert!(MultiValueEncoder::default().encode(&groups).is_err());

    let result = MultiValueDecoder::new().decode("type=field");
    assert!(result.is_err());

    let variations = MultiValueDecoder::new()
        .decode_as(CompositeFormat::Variations, "sku=child,color=red")
        .unwrap();
    assert_eq!(variations[0].get("sku"), Some("child"));
}

#[tokio::test]
async fn test_adversarial_option_titles_survive_export() {
    let catalog = catalog();
    catalog
        .upsert_product(
            ProductBuilder::new(40, "adversarial")
                .website(1)
                .option(
                    CustomOption::new(1, ADVERSARIAL, OptionType::DropDown)
                        .value(CustomOptionValue::new(1, ADVERSARIAL).sku("a&b"))
                        .value(CustomOptionValue::new(2, "Plain")),
                )
                .build(),
        )
        .await;

    for fields_enclosure in [false, true] {
        let params = RawExportParameters::new().fields_enclosure(fields_enclosure);
        let outcome = engine(&catalog).export(&params).await;
        assert!(outcome.is_successful());

        let records = records(&outcome.artifact.contents);
        let rows = rows_for(&records, "adversarial");
        assert_eq!(rows.len(), 1);

        let groups = decode(&rows[0]["custom_options"]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].get("name"), Some(ADVERSARIAL));
        assert_eq!(groups[0].get("option_title"), Some(ADVERSARIAL));
        assert_eq!(groups[0].get("sku"), Some("a&b"));
        assert_eq!(groups[1].get("option_title"), Some("Plain"));
    }
}

fn enclosure() -> impl Strategy<Value = Enclosure> {
    prop_oneof![Just(Enclosure::Minimal), Just(Enclosure::Always)]
}

// A `name` pair first, then unique lowercase keys in generated order
fn option_group() -> impl Strategy<Value = OptionGroup> {
    (
        any::<String>(),
        prop::collection::vec(("[a-z_]{1,12}", any::<String>()), 0..5),
    )
        .prop_map(|(name, pairs)| {
            let mut group = OptionGroup::new().with("name", name);
            for (key, value) in pairs {
                if !group.contains_key(&key) {
                    group.push(key, value);
                }
            }
            group
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn decode_inverts_encode(
        groups in prop::collection::vec(option_group(), 0..5),
        enclosure in enclosure(),
    ) {
        let cell = MultiValueEncoder::new(enclosure).encode(&groups).unwrap();
        let decoded = MultiValueDecoder::new().decode(&cell).unwrap();
        prop_assert_eq!(decoded, groups);
    }

    #[test]
    fn encoded_cell_survives_csv_layer(
        groups in prop::collection::vec(option_group(), 1..4),
        enclosure in enclosure(),
    ) {
        let fields_enclosure = enclosure == Enclosure::Always;
        let cell = MultiValueEncoder::new(enclosure).encode(&groups).unwrap();
        let read_back = write_and_read(&cell, fields_enclosure);
        prop_assert_eq!(&read_back, &cell);
        prop_assert_eq!(MultiValueDecoder::new().decode(&read_back).unwrap(), groups);
    }
}
