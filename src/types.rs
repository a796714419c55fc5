// src/types.rs
//! Shared value types used across module boundaries.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Notion integration token.
///
/// Wrapping the secret in a newtype keeps it out of accidental `Display`
/// output: formatting an `ApiToken` shows a redacted placeholder, never
/// the secret itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Result<Self, EngineError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(EngineError::MissingConfiguration(
                "API token must not be empty".to_string(),
            ));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(****)")
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****")
    }
}

/// An option of a select or multi-select column: `{id, name}`.
///
/// The option id is the stable join key; the name is what the user sees and
/// may be renamed upstream at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The synthetic empty option appended to every option list so that
    /// "unset" is always selectable in an editing surface.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
        }
    }
}
