// src/property/value.rs
//! The scalar value carried by a property descriptor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A property's current value.
///
/// The shape depends on the property's kind: text and choice ids are
/// `Text`, checkboxes are `Bool`, numbers are `Number`. `Json` carries
/// passthrough payloads (e.g. a date range object from a page-query
/// response) verbatim, so unknown shapes survive a store/reload cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Json(Value),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value as a string slice, when it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Decode an arbitrary JSON value into the closest scalar shape.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Json(Value::Number(n)),
            },
            Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }

    /// The value as JSON, for page payloads and rendering surfaces.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
            Self::Json(v) => v.clone(),
        }
    }

    /// Coerce this value to a number, absorbing failures to zero.
    ///
    /// A stored numeric field may arrive as a number or as form text.
    /// Integer parse first, then float parse, then `0` — a numeric field
    /// stays numeric no matter what was stored in it.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let trimmed = s.trim();
                if let Ok(whole) = trimmed.parse::<i64>() {
                    whole as f64
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            _ => 0.0,
        }
    }
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}
