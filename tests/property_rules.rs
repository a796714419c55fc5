// tests/property_rules.rs
//! Classification and default-value rules for the property type vocabulary.

use notion_recur::{PropertyClass, PropertyKind, PropertyValue};
use pretty_assertions::assert_eq;

const IGNORED_TYPE_NAMES: [&str; 9] = [
    "relation",
    "formula",
    "rollup",
    "created_time",
    "created_by",
    "last_edited_time",
    "last_edited_by",
    "people",
    "files",
];

#[test]
fn text_like_types_classify_as_text_with_empty_default() {
    for name in ["email", "phone_number", "rich_text", "title", "url"] {
        let kind = PropertyKind::from_api_name(name);
        assert_eq!(kind.classify(), PropertyClass::Text, "{}", name);
        assert_eq!(kind.default_value(), PropertyValue::Text(String::new()));
    }
}

#[test]
fn choice_like_types_classify_as_choice_with_empty_default() {
    for name in ["select", "multi_select"] {
        let kind = PropertyKind::from_api_name(name);
        assert_eq!(kind.classify(), PropertyClass::Choice, "{}", name);
        assert_eq!(kind.default_value(), PropertyValue::Text(String::new()));
    }
}

#[test]
fn checkbox_and_number_have_falsy_defaults() {
    assert_eq!(PropertyKind::Checkbox.classify(), PropertyClass::Checkbox);
    assert_eq!(
        PropertyKind::Checkbox.default_value(),
        PropertyValue::Bool(false)
    );
    assert_eq!(PropertyKind::Number.classify(), PropertyClass::Number);
    assert_eq!(
        PropertyKind::Number.default_value(),
        PropertyValue::Number(0.0)
    );
}

#[test]
fn date_defaults_to_a_current_timestamp_not_an_epoch() {
    let default = PropertyKind::Date.default_value();
    let text = default.as_str().expect("date default should be text");
    let parsed = chrono::DateTime::parse_from_rfc3339(text)
        .expect("date default should be RFC 3339")
        .with_timezone(&chrono::Utc);
    let age = chrono::Utc::now() - parsed;
    assert!(age.num_seconds() < 60, "default should be freshly evaluated");
    assert!(age.num_seconds() >= 0);
}

#[test]
fn every_ignored_type_is_unsupported_and_never_renders() {
    for name in IGNORED_TYPE_NAMES {
        let kind = PropertyKind::from_api_name(name);
        assert!(kind.is_ignored(), "{}", name);
        assert_eq!(kind.classify(), PropertyClass::Unsupported, "{}", name);
    }
}

#[test]
fn unrecognized_types_pass_through_with_their_own_name() {
    let kind = PropertyKind::from_api_name("status");
    assert_eq!(kind.classify(), PropertyClass::Passthrough);
    assert_eq!(kind.api_name(), "status");
    assert_eq!(kind.default_value(), PropertyValue::Null);
}

#[test]
fn classification_is_pure_and_idempotent() {
    for name in ["title", "select", "checkbox", "number", "rollup", "status"] {
        let kind = PropertyKind::from_api_name(name);
        assert_eq!(kind.classify(), kind.classify());
        // Time-independent kinds also produce identical defaults.
        if kind.classify() != PropertyClass::Date {
            assert_eq!(kind.default_value(), kind.default_value());
        }
    }
}
