// src/property/descriptor.rs
//! The normalized representation of one database column.
//!
//! A descriptor is ephemeral — constructed fresh on every schema fetch —
//! but its serialized form is persisted on the owning task and rehydrated
//! on each reconciliation. The persisted JSON shape is
//! `{id, type, value, name, options}`; serialization additionally emits the
//! derived `html_form_type`/`html_value` fields for rendering collaborators,
//! and rehydration ignores them.

use crate::constants::TITLE_PROPERTY_ID;
use crate::property::kind::{PropertyClass, PropertyKind};
use crate::property::value::PropertyValue;
use crate::types::SelectOption;
use serde::de::Deserializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One database column plus its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Opaque id assigned by Notion; stable across renames; the only join key.
    pub id: String,
    pub kind: PropertyKind,
    /// Display label. May be renamed upstream at any time — never a join key.
    pub name: String,
    /// Present only for choice-like kinds; always ends with the synthetic
    /// empty option so "unset" stays selectable.
    pub options: Option<Vec<SelectOption>>,
    /// Never unset: construction assigns an explicit value or the kind's
    /// default.
    pub value: PropertyValue,
}

impl PropertyDescriptor {
    /// Construct a descriptor, enforcing the structural invariants.
    ///
    /// Options are kept only for choice-like kinds, with the empty option
    /// appended when absent. An ignored kind carries a null value; any other
    /// kind without an explicit value gets its type default.
    pub fn new(
        id: impl Into<String>,
        kind: PropertyKind,
        name: impl Into<String>,
        options: Option<Vec<SelectOption>>,
        value: Option<PropertyValue>,
    ) -> Self {
        let options = if kind.classify() == PropertyClass::Choice {
            let mut options = options.unwrap_or_default();
            if !options.contains(&SelectOption::empty()) {
                options.push(SelectOption::empty());
            }
            Some(options)
        } else {
            None
        };

        let value = match value {
            Some(value) => value,
            None if kind.is_ignored() => PropertyValue::Null,
            None => kind.default_value(),
        };

        Self {
            id: id.into(),
            kind,
            name: name.into(),
            options,
            value,
        }
    }

    /// Whether the current value equals the kind's default.
    ///
    /// Date-shaped kinds compare against a freshly evaluated "now", so a
    /// date value in practice never reads as default and is always sent.
    pub fn is_default(&self) -> bool {
        self.value == self.kind.default_value()
    }

    pub fn is_title(&self) -> bool {
        self.id == TITLE_PROPERTY_ID
    }

    /// The HTML input type a rendering collaborator should use, or `None`
    /// when the property is never surfaced.
    pub fn html_form_type(&self) -> Option<&str> {
        match self.kind.classify() {
            PropertyClass::Text | PropertyClass::Choice => Some("text"),
            PropertyClass::Date => Some("datetime-local"),
            PropertyClass::Checkbox => Some("checkbox"),
            PropertyClass::Number => Some("number"),
            PropertyClass::Passthrough => Some(self.kind.api_name()),
            PropertyClass::Unsupported => None,
        }
    }

    /// The value as a rendering collaborator expects it: checkboxes map to
    /// `"on"`/`"off"`, everything else passes through.
    pub fn html_value(&self) -> Value {
        if self.kind == PropertyKind::Checkbox {
            let on = self.value == PropertyValue::Bool(true);
            Value::String(if on { "on" } else { "off" }.to_string())
        } else {
            self.value.to_json()
        }
    }
}

impl Serialize for PropertyDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PropertyDescriptor", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("options", &self.options)?;
        state.serialize_field("html_form_type", &self.html_form_type())?;
        state.serialize_field("html_value", &self.html_value())?;
        state.end()
    }
}

/// Persisted shape, minus the derived fields.
#[derive(Deserialize)]
struct StoredDescriptor {
    id: String,
    #[serde(rename = "type")]
    kind: PropertyKind,
    name: String,
    #[serde(default)]
    options: Option<Vec<SelectOption>>,
    #[serde(default)]
    value: PropertyValue,
}

impl<'de> Deserialize<'de> for PropertyDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredDescriptor::deserialize(deserializer)?;
        Ok(PropertyDescriptor::new(
            stored.id,
            stored.kind,
            stored.name,
            stored.options,
            Some(stored.value),
        ))
    }
}
