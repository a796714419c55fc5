// tests/page_request.rs
//! Encoding descriptor lists into page-creation request bodies.

use notion_recur::{
    PageRequestBuilder, PropertyDescriptor, PropertyKind, PropertyValue, SchemaConverter,
    SelectOption,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn with_value(kind: PropertyKind, id: &str, name: &str, value: PropertyValue) -> PropertyDescriptor {
    PropertyDescriptor::new(id, kind, name, None, Some(value))
}

#[test]
fn per_type_encodings_match_the_page_api() {
    let builder = PageRequestBuilder::new();
    let descriptors = vec![
        with_value(
            PropertyKind::Title,
            "title",
            "Expense",
            PropertyValue::from("Rent"),
        ),
        with_value(
            PropertyKind::RichText,
            "!vXu",
            "Comment",
            PropertyValue::from("pay before the 5th"),
        ),
        PropertyDescriptor::new(
            "epmG",
            PropertyKind::Select,
            "Priority",
            Some(vec![SelectOption::new("b7c6", "test1")]),
            Some(PropertyValue::from("b7c6")),
        ),
        PropertyDescriptor::new(
            "93>",
            PropertyKind::MultiSelect,
            "Category",
            Some(vec![SelectOption::new("6d11", "Home")]),
            Some(PropertyValue::from("6d11")),
        ),
        with_value(
            PropertyKind::Number,
            "%225",
            "Amount",
            PropertyValue::Number(690.0),
        ),
    ];

    let properties = builder.build_create_page_properties(&descriptors);
    assert_eq!(
        serde_json::Value::Object(properties),
        json!({
            "Expense": [{"text": {"content": "Rent"}}],
            "Comment": [{"text": {"content": "pay before the 5th"}}],
            "Priority": {"id": "b7c6"},
            "Category": [{"id": "6d11"}],
            "Amount": 690.0,
        })
    );
}

#[test]
fn default_values_are_omitted_except_checkboxes() {
    let builder = PageRequestBuilder::new();
    let descriptors = vec![
        with_value(
            PropertyKind::RichText,
            "t1",
            "Comment",
            PropertyValue::Text(String::new()),
        ),
        with_value(PropertyKind::Number, "n1", "Amount", PropertyValue::Number(0.0)),
        PropertyDescriptor::new("Gwjd", PropertyKind::Checkbox, "Completed", None, None),
    ];

    let properties = builder.build_create_page_properties(&descriptors);
    // An unchecked checkbox is meaningful; everything else at default is not.
    assert_eq!(
        serde_json::Value::Object(properties),
        json!({"Completed": false})
    );
}

#[test]
fn ignored_descriptors_never_reach_the_payload() {
    let builder = PageRequestBuilder::new();
    let descriptors = vec![
        PropertyDescriptor::new(
            "r0ll",
            PropertyKind::Rollup,
            "Total",
            None,
            Some(PropertyValue::from("42")),
        ),
        with_value(
            PropertyKind::Title,
            "title",
            "Expense",
            PropertyValue::from("Rent"),
        ),
    ];

    let properties = builder.build_create_page_properties(&descriptors);
    assert!(!properties.contains_key("Total"));
    assert_eq!(properties.len(), 1);
}

#[test]
fn builder_output_is_deterministic() {
    let descriptors = vec![
        with_value(
            PropertyKind::Title,
            "title",
            "Expense",
            PropertyValue::from("Rent"),
        ),
        PropertyDescriptor::new("Gwjd", PropertyKind::Checkbox, "Completed", None, None),
    ];
    let builder = PageRequestBuilder::new();
    assert_eq!(
        builder.build_create_page_properties(&descriptors),
        builder.build_create_page_properties(&descriptors)
    );
}

#[test]
fn encoded_text_survives_a_decode_round_trip() {
    let original = "pay before the 5th";
    let builder = PageRequestBuilder::new();
    let properties = builder.build_create_page_properties(&[with_value(
        PropertyKind::RichText,
        "!vXu",
        "Comment",
        PropertyValue::from(original),
    )]);

    // Feed the encoded runs back through value extraction, as if Notion
    // returned them in a query response.
    let raw = json!({
        "id": "db-1",
        "title": [],
        "properties": {
            "Comment": {
                "id": "!vXu",
                "type": "rich_text",
                "rich_text": properties["Comment"],
            }
        }
    });
    let database = SchemaConverter::new().normalize(&raw).unwrap();
    assert_eq!(database.properties[0].value, PropertyValue::from(original));
}
