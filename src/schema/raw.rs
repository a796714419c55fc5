// src/schema/raw.rs
//! Serde shapes for the raw Notion API representation of a database.
//!
//! `IndexMap` everywhere a property mapping appears: the source ordering of
//! columns is part of the contract and a plain JSON object decode would
//! lose it.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// A raw database object as returned by `GET /v1/databases/{id}`, or a raw
/// page-property mapping from a query response routed through the same
/// shape.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDatabase {
    pub id: String,
    #[serde(default)]
    pub title: Vec<RawRichTextRun>,
    #[serde(default)]
    pub properties: IndexMap<String, RawProperty>,
}

impl RawDatabase {
    /// The database's display name: the concatenated text of its title
    /// rich-text array, or an empty string when absent.
    pub fn display_name(&self) -> String {
        concat_text_runs(&self.title)
    }
}

/// One entry of a raw `properties` mapping: `{id, type, <type>: payload}`.
///
/// The type-specific payload lives under a key equal to the type name, so
/// it is captured by flattening and looked up by `type_payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(flatten)]
    pub payload: IndexMap<String, Value>,
}

impl RawProperty {
    /// The payload object stored under the key named after the type.
    pub fn type_payload(&self) -> Option<&Value> {
        self.payload.get(&self.type_name)
    }
}

/// One run of a rich-text array. Only the editable `text.content` matters
/// here; mention and equation runs contribute nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRichTextRun {
    #[serde(default)]
    pub text: Option<RawTextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTextContent {
    #[serde(default)]
    pub content: String,
}

/// Concatenate the `text.content` of every run into one string.
pub fn concat_text_runs(runs: &[RawRichTextRun]) -> String {
    runs.iter()
        .filter_map(|run| run.text.as_ref())
        .map(|text| text.content.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_ordering_survives_decoding() {
        let raw: RawDatabase = serde_json::from_value(json!({
            "id": "db-1",
            "title": [],
            "properties": {
                "Zeta": {"id": "z1", "type": "checkbox", "checkbox": {}},
                "Alpha": {"id": "a1", "type": "number", "number": {"format": "number"}},
                "Mid": {"id": "m1", "type": "rich_text", "rich_text": {}},
            }
        }))
        .unwrap();
        let names: Vec<&str> = raw.properties.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn type_payload_is_found_under_the_type_key() {
        let raw: RawProperty = serde_json::from_value(json!({
            "id": "epmG",
            "type": "select",
            "select": {"options": [{"id": "b7c6", "name": "test1", "color": "green"}]}
        }))
        .unwrap();
        assert!(raw.type_payload().unwrap().get("options").is_some());
    }

    #[test]
    fn text_runs_concatenate_skipping_non_text_content() {
        let runs: Vec<RawRichTextRun> = serde_json::from_value(json!([
            {"type": "text", "text": {"content": "Re", "link": null}, "plain_text": "Re"},
            {"type": "mention", "mention": {"type": "user"}},
            {"type": "text", "text": {"content": "nt", "link": null}, "plain_text": "nt"},
        ]))
        .unwrap();
        assert_eq!(concat_text_runs(&runs), "Rent");
    }
}
