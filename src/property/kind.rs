// src/property/kind.rs
//! The property type vocabulary and its classification rules.
//!
//! Notion reports a property's type as a string (`"rich_text"`,
//! `"multi_select"`, ...). `PropertyKind` turns that string into a tagged
//! variant so that classification, default values, and encoding are
//! exhaustive matches instead of duck-typed dictionary access. Type names
//! this crate has never seen survive round-trips through `Other`.

use crate::property::value::PropertyValue;
use chrono::{SecondsFormat, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Notion property type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Title,
    RichText,
    Url,
    Email,
    PhoneNumber,
    Select,
    MultiSelect,
    Date,
    Checkbox,
    Number,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    People,
    Files,
    Relation,
    Formula,
    Rollup,
    /// A type name this crate does not recognize, carried verbatim.
    Other(String),
}

/// Behavior class of a property type — what kind of value it holds and how
/// the engine treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClass {
    /// Free-form text: `email`, `phone_number`, `rich_text`, `title`, `url`.
    Text,
    /// Constrained to a fixed option set: `select`, `multi_select`.
    Choice,
    /// A point in time: `date`.
    Date,
    Checkbox,
    Number,
    /// Deliberately never surfaced or round-tripped.
    Unsupported,
    /// Unrecognized type — value passed through verbatim, type name doubles
    /// as the rendering hint.
    Passthrough,
}

impl PropertyKind {
    /// Parse a Notion API type name.
    pub fn from_api_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            "number" => Self::Number,
            "created_time" => Self::CreatedTime,
            "created_by" => Self::CreatedBy,
            "last_edited_time" => Self::LastEditedTime,
            "last_edited_by" => Self::LastEditedBy,
            "people" => Self::People,
            "files" => Self::Files,
            "relation" => Self::Relation,
            "formula" => Self::Formula,
            "rollup" => Self::Rollup,
            other => Self::Other(other.to_string()),
        }
    }

    /// The Notion API type name for this kind.
    pub fn api_name(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::CreatedTime => "created_time",
            Self::CreatedBy => "created_by",
            Self::LastEditedTime => "last_edited_time",
            Self::LastEditedBy => "last_edited_by",
            Self::People => "people",
            Self::Files => "files",
            Self::Relation => "relation",
            Self::Formula => "formula",
            Self::Rollup => "rollup",
            Self::Other(name) => name,
        }
    }

    /// Whether this type belongs to the ignored set.
    ///
    /// Ignored properties must never appear in descriptor output, never be
    /// offered for editing, and never be included in page-creation payloads.
    /// A database may have such columns; the system behaves as if it did not.
    pub fn is_ignored(&self) -> bool {
        matches!(
            self,
            Self::Relation
                | Self::Formula
                | Self::Rollup
                | Self::CreatedTime
                | Self::CreatedBy
                | Self::LastEditedTime
                | Self::LastEditedBy
                | Self::People
                | Self::Files
        )
    }

    /// Classify this type into its behavior class.
    ///
    /// Membership in the ignored set wins over every other classification:
    /// `created_time` is date-shaped but still `Unsupported`.
    pub fn classify(&self) -> PropertyClass {
        match self {
            Self::Title | Self::RichText | Self::Url | Self::Email | Self::PhoneNumber => {
                PropertyClass::Text
            }
            Self::Select | Self::MultiSelect => PropertyClass::Choice,
            Self::Date => PropertyClass::Date,
            Self::Checkbox => PropertyClass::Checkbox,
            Self::Number => PropertyClass::Number,
            Self::Relation
            | Self::Formula
            | Self::Rollup
            | Self::CreatedTime
            | Self::CreatedBy
            | Self::LastEditedTime
            | Self::LastEditedBy
            | Self::People
            | Self::Files => PropertyClass::Unsupported,
            Self::Other(_) => PropertyClass::Passthrough,
        }
    }

    /// The default value assigned when a property has no value.
    ///
    /// Date-shaped types default to the current timestamp at evaluation
    /// time, not a fixed epoch. `created_time`/`last_edited_time` share the
    /// date default even though the ignored set keeps them from ever being
    /// surfaced with one.
    pub fn default_value(&self) -> PropertyValue {
        match self {
            Self::Title
            | Self::RichText
            | Self::Url
            | Self::Email
            | Self::PhoneNumber
            | Self::Select
            | Self::MultiSelect => PropertyValue::Text(String::new()),
            Self::Number => PropertyValue::Number(0.0),
            Self::Checkbox => PropertyValue::Bool(false),
            Self::Date | Self::CreatedTime | Self::LastEditedTime => PropertyValue::Text(
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            Self::CreatedBy
            | Self::LastEditedBy
            | Self::People
            | Self::Files
            | Self::Relation
            | Self::Formula
            | Self::Rollup
            | Self::Other(_) => PropertyValue::Null,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

// Persisted and wire form is the bare API type name.
impl Serialize for PropertyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.api_name())
    }
}

impl<'de> Deserialize<'de> for PropertyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_api_name(&name))
    }
}
