// src/page/request.rs
//! Building the `properties` body of a Notion page-creation request.

use crate::property::{PropertyDescriptor, PropertyKind};
use serde_json::{json, Map, Value};

/// Converts final descriptor lists into the nested-object shape the
/// page-creation API expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequestBuilder;

impl PageRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the properties map for `POST /v1/pages`, keyed by property
    /// **name** — the page-creation API addresses columns by display name,
    /// not id.
    ///
    /// Descriptors still holding their type default are left out, with one
    /// exception: checkboxes are always sent, because an omitted `false`
    /// would be indistinguishable from "unset".
    pub fn build_create_page_properties(
        &self,
        descriptors: &[PropertyDescriptor],
    ) -> Map<String, Value> {
        let mut properties = Map::new();
        for descriptor in descriptors {
            if descriptor.kind.is_ignored() {
                continue;
            }
            if descriptor.is_default() && descriptor.kind != PropertyKind::Checkbox {
                continue;
            }
            properties.insert(descriptor.name.clone(), self.encode(descriptor));
        }
        properties
    }

    /// Encode one descriptor's value per its kind's API shape.
    fn encode(&self, descriptor: &PropertyDescriptor) -> Value {
        let value = descriptor.value.to_json();
        match descriptor.kind {
            PropertyKind::Title | PropertyKind::RichText => json!([{"text": {"content": value}}]),
            PropertyKind::Select => json!({"id": value}),
            PropertyKind::MultiSelect => json!([{"id": value}]),
            _ => value,
        }
    }
}
