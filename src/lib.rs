// src/lib.rs
//! notion-recur library — creates recurring pages in Notion databases by
//! reconciling stored property values against live schemas.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `EngineError`, `NotionErrorCode`
//! - **Property model** — `PropertyDescriptor`, `PropertyKind`,
//!   `PropertyClass`, `PropertyValue`, `SelectOption`
//! - **Schema handling** — `SchemaConverter`, `ValueReconciler`,
//!   `NormalizedDatabase`, raw payload shapes
//! - **Page requests** — `PageRequestBuilder`
//! - **Engine & seams** — `RecurrenceEngine`, `StoredTask`, the
//!   collaborator traits
//! - **Shipped collaborators** — `NotionHttpClient`, `JsonTaskStore`,
//!   `EnvAccessGrants`

// Internal modules
mod api;
mod config;
mod constants;
mod engine;
mod error;
mod page;
mod property;
mod schema;
mod store;
mod types;

// --- Error Handling ---
pub use crate::error::{EngineError, NotionErrorCode, Result};

// --- Property Model ---
pub use crate::property::{PropertyClass, PropertyDescriptor, PropertyKind, PropertyValue};
pub use crate::types::{ApiToken, SelectOption};

// --- Schema Handling ---
pub use crate::schema::raw::{
    concat_text_runs, RawDatabase, RawProperty, RawRichTextRun, RawTextContent,
};
pub use crate::schema::{NormalizedDatabase, SchemaConverter, ValueReconciler};

// --- Page Requests ---
pub use crate::page::PageRequestBuilder;

// --- Engine & Collaborator Seams ---
pub use crate::api::{PageWriter, SchemaSource};
pub use crate::engine::{
    AccessGrants, RecurrenceEngine, RunOutcome, SchemaCache, StoredTask, TaskStore,
};

// --- Shipped Collaborators ---
pub use crate::api::NotionHttpClient;
pub use crate::store::{EnvAccessGrants, JsonTaskStore};

// --- Configuration ---
pub use crate::config::{CommandLineInput, RunSettings};

// --- Domain Constants ---
pub use crate::constants::{SYNTHESIZED_TITLE_NAME, TITLE_PROPERTY_ID};
