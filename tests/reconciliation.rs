// tests/reconciliation.rs
//! Merging stored values onto a live schema, including every schema-drift
//! tolerance.

use notion_recur::{
    PropertyDescriptor, PropertyKind, PropertyValue, SelectOption, ValueReconciler,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

fn checkbox(id: &str, name: &str) -> PropertyDescriptor {
    PropertyDescriptor::new(id, PropertyKind::Checkbox, name, None, None)
}

fn select(id: &str, name: &str, options: Vec<SelectOption>) -> PropertyDescriptor {
    PropertyDescriptor::new(id, PropertyKind::Select, name, Some(options), None)
}

fn number(id: &str, name: &str) -> PropertyDescriptor {
    PropertyDescriptor::new(id, PropertyKind::Number, name, None, None)
}

fn rich_text(id: &str, name: &str) -> PropertyDescriptor {
    PropertyDescriptor::new(id, PropertyKind::RichText, name, None, None)
}

fn stored(pairs: &[(&str, PropertyValue)]) -> HashMap<String, PropertyValue> {
    pairs
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

#[test]
fn absent_checkbox_means_unchecked_present_means_checked() {
    let schema = vec![checkbox("Gwjd", "Completed")];
    let reconciler = ValueReconciler::new();

    let unchecked = reconciler.reconcile(&schema, &HashMap::new());
    assert_eq!(unchecked[0].value, PropertyValue::Bool(false));

    // Presence alone checks the box; the stored value is not consulted.
    let checked = reconciler.reconcile(&schema, &stored(&[("Gwjd", PropertyValue::Bool(false))]));
    assert_eq!(checked[0].value, PropertyValue::Bool(true));
}

#[test]
fn every_checkbox_comes_back_boolean() {
    let schema = vec![
        checkbox("c1", "One"),
        checkbox("c2", "Two"),
        checkbox("c3", "Three"),
    ];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[
            ("c1", PropertyValue::from("on")),
            ("c3", PropertyValue::Null),
        ]),
    );
    assert_eq!(merged[0].value, PropertyValue::Bool(true));
    assert_eq!(merged[1].value, PropertyValue::Bool(false));
    assert_eq!(merged[2].value, PropertyValue::Bool(true));
}

#[test]
fn live_select_option_is_kept() {
    let schema = vec![select(
        "epmG",
        "Priority",
        vec![SelectOption::new("b7c6b93e", "test1")],
    )];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[("epmG", PropertyValue::from("b7c6b93e"))]),
    );
    assert_eq!(merged[0].value, PropertyValue::Text("b7c6b93e".to_string()));
}

#[test]
fn stale_select_option_is_silently_dropped_to_default() {
    let schema = vec![select(
        "epmG",
        "Priority",
        vec![SelectOption::new("A", "first"), SelectOption::new("B", "second")],
    )];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[("epmG", PropertyValue::from("C"))]),
    );
    assert_eq!(merged[0].value, PropertyValue::Text(String::new()));
}

#[test]
fn non_text_stored_selection_counts_as_stale() {
    let schema = vec![select("epmG", "Priority", vec![SelectOption::new("A", "first")])];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[("epmG", PropertyValue::Number(7.0))]),
    );
    assert_eq!(merged[0].value, PropertyValue::Text(String::new()));
}

#[test]
fn numbers_coerce_and_absorb_parse_failures() {
    let schema = vec![number("n1", "A"), number("n2", "B"), number("n3", "C")];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[
            ("n1", PropertyValue::from("3.3")),
            ("n2", PropertyValue::from("abc")),
            ("n3", PropertyValue::from("12")),
        ]),
    );
    assert_eq!(merged[0].value, PropertyValue::Number(3.3));
    assert_eq!(merged[1].value, PropertyValue::Number(0.0));
    assert_eq!(merged[2].value, PropertyValue::Number(12.0));
}

#[test]
fn text_values_carry_over_verbatim_and_absences_keep_defaults() {
    let schema = vec![rich_text("t1", "Comment"), rich_text("t2", "Notes")];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[("t1", PropertyValue::from("pay before the 5th"))]),
    );
    assert_eq!(
        merged[0].value,
        PropertyValue::Text("pay before the 5th".to_string())
    );
    assert_eq!(merged[1].value, PropertyValue::Text(String::new()));
}

#[test]
fn removed_properties_simply_vanish_from_the_result() {
    // The stored snapshot still knows a property the live schema dropped.
    let schema = vec![rich_text("kept", "Kept")];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[
            ("kept", PropertyValue::from("still here")),
            ("removed", PropertyValue::from("orphaned")),
        ]),
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "kept");
}

#[test]
fn stale_stored_state_cannot_reintroduce_ignored_properties() {
    let schema = vec![
        PropertyDescriptor::new("r0ll", PropertyKind::Rollup, "Total", None, None),
        rich_text("t1", "Comment"),
    ];
    let merged = ValueReconciler::new().reconcile(
        &schema,
        &stored(&[("r0ll", PropertyValue::from("42"))]),
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "t1");
}

#[test]
fn existing_title_descriptor_takes_the_task_name() {
    let schema = vec![
        PropertyDescriptor::new("title", PropertyKind::Title, "Expense", None, None),
        checkbox("Gwjd", "Completed"),
    ];
    let reconciler = ValueReconciler::new();
    let merged = reconciler.reconcile_with_title(&schema, &HashMap::new(), "Rent");
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].value, PropertyValue::Text("Rent".to_string()));
    assert_eq!(merged[1].id, "Gwjd");
}

#[test]
fn title_fallback_replaces_unusable_schema() {
    // With no title descriptor anywhere, the synthesized title becomes the
    // ENTIRE list — other columns are dropped until a real schema shows up.
    let schema = vec![checkbox("Gwjd", "Completed")];
    let merged =
        ValueReconciler::new().reconcile_with_title(&schema, &HashMap::new(), "new_task_name");

    assert_eq!(merged.len(), 1);
    let title = serde_json::to_value(&merged[0]).unwrap();
    assert_eq!(title["id"], json!("title"));
    assert_eq!(title["type"], json!("title"));
    assert_eq!(title["value"], json!("new_task_name"));
    assert_eq!(title["name"], json!("Name"));
    assert_eq!(title["options"], json!(null));
}

#[test]
fn reconciliation_is_a_pure_transform() {
    let schema = vec![select(
        "epmG",
        "Priority",
        vec![SelectOption::new("A", "first")],
    )];
    let values = stored(&[("epmG", PropertyValue::from("A"))]);
    let reconciler = ValueReconciler::new();

    let first = reconciler.reconcile(&schema, &values);
    let second = reconciler.reconcile(&schema, &values);
    assert_eq!(first, second);
    // Inputs are untouched.
    assert_eq!(schema[0].value, PropertyValue::Text(String::new()));
}
