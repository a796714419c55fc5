// src/engine/task.rs
//! The persisted recurring-task entity, as this engine sees it.
//!
//! Scheduling metadata (interval, start time) belongs to the scheduling
//! collaborator and never crosses this boundary.

use crate::property::{PropertyDescriptor, PropertyKind, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored recurring task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub id: String,
    pub owner: String,
    /// Populates the title property of every page this task creates.
    pub name: String,
    /// `None` (or empty) while the task is unbound from any database.
    #[serde(default)]
    pub database_id: Option<String>,
    /// Denormalized display name of the bound database.
    #[serde(default)]
    pub database_name: Option<String>,
    /// Snapshot of the descriptor list from the last edit or fire.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

impl StoredTask {
    /// The bound database id, when the task is actually bound.
    pub fn bound_database_id(&self) -> Option<&str> {
        self.database_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The stored snapshot as a value map keyed by property id, the form
    /// reconciliation consumes. Ids are the only stable join key; names are
    /// not in the map on purpose.
    ///
    /// An unchecked checkbox is represented by absence: presence in the
    /// value map is what reconciliation reads as "checked".
    pub fn stored_values(&self) -> HashMap<String, PropertyValue> {
        self.properties
            .iter()
            .filter(|descriptor| {
                !(descriptor.kind == PropertyKind::Checkbox
                    && descriptor.value != PropertyValue::Bool(true))
            })
            .map(|descriptor| (descriptor.id.clone(), descriptor.value.clone()))
            .collect()
    }

    /// Degrade to the unbound state, dropping the schema snapshot's anchor.
    pub fn clear_database_binding(&mut self) {
        self.database_id = None;
        self.database_name = None;
    }
}
