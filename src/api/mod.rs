// src/api/mod.rs
//! Notion API interaction — fetching database schemas and creating pages.
//!
//! Business logic depends on the two capability traits below, never on
//! HTTP details. Each call is one synchronous round-trip with no internal
//! retry; retry/backoff policy belongs to the scheduling collaborator.

pub mod client;

use crate::error::EngineError;
use crate::schema::raw::RawDatabase;
use crate::types::ApiToken;
use serde_json::{Map, Value};

/// The ability to fetch a database's live schema.
#[async_trait::async_trait]
pub trait SchemaSource: Send + Sync {
    async fn fetch_database_schema(
        &self,
        token: &ApiToken,
        database_id: &str,
    ) -> Result<RawDatabase, EngineError>;
}

/// The ability to create a page in a database.
///
/// Fire-and-forget from the engine's perspective: the created page is not
/// consumed further.
#[async_trait::async_trait]
pub trait PageWriter: Send + Sync {
    async fn create_page(
        &self,
        token: &ApiToken,
        database_id: &str,
        properties: Map<String, Value>,
    ) -> Result<(), EngineError>;
}

pub use client::NotionHttpClient;
