// src/schema/convert.rs
//! Conversion of raw Notion database payloads into ordered descriptor
//! lists.
//!
//! The same conversion serves two payload families: pure schema responses
//! (`GET /v1/databases/{id}`), whose property payloads only declare the
//! column, and page-query responses, whose payloads carry values. The
//! schema-only heuristic tells them apart per property.

use crate::constants::SCHEMA_MARKER_KEYS;
use crate::error::EngineError;
use crate::property::{PropertyClass, PropertyDescriptor, PropertyKind, PropertyValue};
use crate::schema::raw::{concat_text_runs, RawDatabase, RawProperty, RawRichTextRun};
use crate::types::SelectOption;
use serde::Deserialize;
use serde_json::Value;

/// A database reduced to the form the rest of the engine works with.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedDatabase {
    pub id: String,
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

/// Converts raw Notion database payloads into `NormalizedDatabase`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaConverter;

impl SchemaConverter {
    pub fn new() -> Self {
        Self
    }

    /// Normalize an untyped database payload, as handed over by rendering
    /// collaborators that hold the raw API response.
    pub fn normalize(&self, raw: &Value) -> Result<NormalizedDatabase, EngineError> {
        let raw = RawDatabase::deserialize(raw)
            .map_err(|err| EngineError::MalformedSchema(err.to_string()))?;
        self.normalize_raw(&raw)
    }

    /// Normalize an already-decoded database payload.
    pub fn normalize_raw(&self, raw: &RawDatabase) -> Result<NormalizedDatabase, EngineError> {
        Ok(NormalizedDatabase {
            id: raw.id.clone(),
            name: raw.display_name(),
            properties: self.to_descriptors(raw)?,
        })
    }

    /// Convert the property mapping into descriptors, in source order,
    /// dropping every property of an ignored type.
    pub fn to_descriptors(
        &self,
        raw: &RawDatabase,
    ) -> Result<Vec<PropertyDescriptor>, EngineError> {
        let mut descriptors = Vec::with_capacity(raw.properties.len());
        for (name, property) in &raw.properties {
            if let Some(descriptor) = self.descriptor_from_raw(name, property)? {
                descriptors.push(descriptor);
            }
        }
        Ok(descriptors)
    }

    /// Convert one raw property, returning `None` for ignored types.
    pub fn descriptor_from_raw(
        &self,
        name: &str,
        property: &RawProperty,
    ) -> Result<Option<PropertyDescriptor>, EngineError> {
        let kind = PropertyKind::from_api_name(&property.type_name);
        if kind.is_ignored() {
            return Ok(None);
        }

        let payload = property.type_payload().ok_or_else(|| {
            EngineError::MalformedSchema(format!(
                "property '{}' has no '{}' payload",
                name, property.type_name
            ))
        })?;

        if is_schema_only(payload) {
            let options = if kind.classify() == PropertyClass::Choice {
                Some(decode_options(payload))
            } else {
                None
            };
            return Ok(Some(PropertyDescriptor::new(
                &property.id,
                kind,
                name,
                options,
                None,
            )));
        }

        // A null payload (an empty url/email column in a query response)
        // carries no value; the type default keeps the invariant that a
        // supported descriptor is never valueless.
        let value = match decode_value(&kind, payload, name)? {
            PropertyValue::Null => None,
            value => Some(value),
        };
        Ok(Some(PropertyDescriptor::new(
            &property.id,
            kind,
            name,
            None,
            value,
        )))
    }
}

/// Whether a payload declares the column rather than carrying a value.
///
/// An empty object, or an object with an `options`/`format` key, is a
/// schema declaration: there is no value present and the default applies.
fn is_schema_only(payload: &Value) -> bool {
    match payload.as_object() {
        Some(object) => {
            object.is_empty() || SCHEMA_MARKER_KEYS.iter().any(|key| object.contains_key(*key))
        }
        None => false,
    }
}

/// Pull the `{id, name}` option records out of a choice payload.
fn decode_options(payload: &Value) -> Vec<SelectOption> {
    payload
        .get("options")
        .and_then(|options| Vec::<SelectOption>::deserialize(options).ok())
        .unwrap_or_default()
}

/// Decode a page-query value payload per the kind's rule.
fn decode_value(
    kind: &PropertyKind,
    payload: &Value,
    name: &str,
) -> Result<PropertyValue, EngineError> {
    match kind {
        // Collapsed to the first selected option; the engine models
        // multi-select with single-select semantics throughout.
        PropertyKind::MultiSelect => {
            let selected = payload.as_array().ok_or_else(|| {
                EngineError::MalformedSchema(format!(
                    "multi_select value for '{}' is not an array",
                    name
                ))
            })?;
            Ok(match selected.first() {
                Some(option) => PropertyValue::Text(option_id(option, name)?),
                None => PropertyValue::Text(String::new()),
            })
        }
        PropertyKind::Select => Ok(PropertyValue::Text(option_id(payload, name)?)),
        PropertyKind::Title | PropertyKind::RichText => {
            let runs = Vec::<RawRichTextRun>::deserialize(payload).map_err(|err| {
                EngineError::MalformedSchema(format!(
                    "rich text value for '{}' is malformed: {}",
                    name, err
                ))
            })?;
            Ok(PropertyValue::Text(concat_text_runs(&runs)))
        }
        _ => Ok(PropertyValue::from_json(payload.clone())),
    }
}

fn option_id(option: &Value, name: &str) -> Result<String, EngineError> {
    option
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            EngineError::MalformedSchema(format!("selected option for '{}' has no id", name))
        })
}
