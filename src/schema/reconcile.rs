// src/schema/reconcile.rs
//! Reconciliation of stored property values against a live schema.
//!
//! The stored snapshot and the live schema drift apart between a task's
//! last edit and its next fire: columns get renamed, retyped, or removed,
//! and select options disappear. Reconciliation keys strictly on property
//! ids, keeps whatever is still compatible, and substitutes defaults for
//! everything else. Pure transform over in-memory structures; safe to call
//! concurrently for different tasks.

use crate::constants::{SYNTHESIZED_TITLE_NAME, TITLE_PROPERTY_ID};
use crate::property::{PropertyClass, PropertyDescriptor, PropertyKind, PropertyValue};
use std::collections::HashMap;

/// Merges stored user-entered values onto freshly fetched schema
/// descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueReconciler;

impl ValueReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Merge `stored` values onto `schema` descriptors, in schema order.
    ///
    /// Per descriptor:
    /// - ignored kinds are skipped, so stale stored state cannot
    ///   reintroduce them;
    /// - a checkbox is checked exactly when its id is present in the
    ///   stored map — absence is the canonical "unchecked", not "unknown";
    /// - a number is coerced, with parse failures absorbed to zero;
    /// - a choice value is kept only while it matches a live option id;
    ///   a stale selection silently resets to the default;
    /// - anything else present is taken verbatim;
    /// - anything absent keeps the default assigned at construction.
    pub fn reconcile(
        &self,
        schema: &[PropertyDescriptor],
        stored: &HashMap<String, PropertyValue>,
    ) -> Vec<PropertyDescriptor> {
        let mut merged = Vec::with_capacity(schema.len());
        for descriptor in schema {
            if descriptor.kind.is_ignored() {
                continue;
            }
            let mut descriptor = descriptor.clone();
            let stored_value = stored.get(&descriptor.id);
            match descriptor.kind.classify() {
                PropertyClass::Checkbox => {
                    descriptor.value = PropertyValue::Bool(stored_value.is_some());
                }
                PropertyClass::Number => {
                    if let Some(value) = stored_value {
                        descriptor.value = PropertyValue::Number(value.coerce_number());
                    }
                }
                PropertyClass::Choice => {
                    if let Some(value) = stored_value {
                        if self.matches_live_option(&descriptor, value) {
                            descriptor.value = value.clone();
                        } else {
                            log::debug!(
                                "stored selection for property {} no longer exists, resetting",
                                descriptor.id
                            );
                            descriptor.value = descriptor.kind.default_value();
                        }
                    }
                }
                _ => {
                    if let Some(value) = stored_value {
                        descriptor.value = value.clone();
                    }
                }
            }
            merged.push(descriptor);
        }
        merged
    }

    /// Ensure exactly one title descriptor valued with the task's name.
    ///
    /// When the schema-derived list has no title descriptor, a synthesized
    /// title replaces the entire list: with no usable schema there is
    /// nothing else worth carrying, and a single-field fallback still
    /// produces a titled page.
    pub fn apply_task_title(
        &self,
        mut descriptors: Vec<PropertyDescriptor>,
        task_name: &str,
    ) -> Vec<PropertyDescriptor> {
        match descriptors.iter().position(|d| d.is_title()) {
            Some(index) => {
                descriptors[index].value = PropertyValue::Text(task_name.to_string());
                descriptors
            }
            None => vec![PropertyDescriptor::new(
                TITLE_PROPERTY_ID,
                PropertyKind::Title,
                SYNTHESIZED_TITLE_NAME,
                None,
                Some(PropertyValue::Text(task_name.to_string())),
            )],
        }
    }

    /// Merge and title-sync in one pass.
    pub fn reconcile_with_title(
        &self,
        schema: &[PropertyDescriptor],
        stored: &HashMap<String, PropertyValue>,
        task_name: &str,
    ) -> Vec<PropertyDescriptor> {
        self.apply_task_title(self.reconcile(schema, stored), task_name)
    }

    fn matches_live_option(&self, descriptor: &PropertyDescriptor, value: &PropertyValue) -> bool {
        let live_options = descriptor.options.as_deref().unwrap_or(&[]);
        match value.as_str() {
            Some(id) => live_options.iter().any(|option| option.id == id),
            None => false,
        }
    }
}
