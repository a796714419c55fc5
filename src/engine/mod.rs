// src/engine/mod.rs
//! The reconciliation pipeline and its collaborator seams.
//!
//! The engine owns no persistence and no scheduling: collaborators supply
//! stored tasks, access grants, and the two Notion round-trips, and the
//! engine runs the pure transform chain between them — normalize,
//! reconcile, title-sync, build, create. It holds no shared mutable state
//! and allocates fresh descriptor lists per call, so concurrent invocations
//! for different tasks are safe.

mod task;

pub use task::StoredTask;

use crate::api::{PageWriter, SchemaSource};
use crate::error::EngineError;
use crate::page::PageRequestBuilder;
use crate::property::PropertyDescriptor;
use crate::schema::{NormalizedDatabase, SchemaConverter, ValueReconciler};
use crate::types::ApiToken;
use serde_json::Value;
use std::sync::Arc;

/// The ability to load and persist recurring tasks.
#[async_trait::async_trait]
pub trait TaskStore: Send + Sync {
    async fn load_task(&self, task_id: &str) -> Result<Option<StoredTask>, EngineError>;
    async fn persist_task(&self, task: &StoredTask) -> Result<(), EngineError>;
}

/// The ability to resolve an owner's workspace access token.
#[async_trait::async_trait]
pub trait AccessGrants: Send + Sync {
    async fn access_token_for(&self, owner: &str) -> Result<Option<ApiToken>, EngineError>;
}

/// The ability to keep a denormalized copy of the last-fetched schema.
///
/// Refreshed opportunistically whenever a task using the database fires.
#[async_trait::async_trait]
pub trait SchemaCache: Send + Sync {
    async fn refresh(&self, database: &NormalizedDatabase) -> Result<(), EngineError>;
}

/// What a scheduled fire actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A page was created and the task's snapshot updated.
    Created,
    /// The task has no database binding; nothing to do.
    SkippedUnbound,
    /// The schema was unreachable with this credential, so the binding was
    /// cleared instead of failing the run.
    BindingCleared,
}

/// Drives the full pipeline for one scheduled fire.
pub struct RecurrenceEngine {
    schemas: Arc<dyn SchemaSource>,
    pages: Arc<dyn PageWriter>,
    store: Arc<dyn TaskStore>,
    grants: Arc<dyn AccessGrants>,
    cache: Arc<dyn SchemaCache>,
    converter: SchemaConverter,
    reconciler: ValueReconciler,
    builder: PageRequestBuilder,
}

impl RecurrenceEngine {
    pub fn new(
        schemas: Arc<dyn SchemaSource>,
        pages: Arc<dyn PageWriter>,
        store: Arc<dyn TaskStore>,
        grants: Arc<dyn AccessGrants>,
        cache: Arc<dyn SchemaCache>,
    ) -> Self {
        Self {
            schemas,
            pages,
            store,
            grants,
            cache,
            converter: SchemaConverter::new(),
            reconciler: ValueReconciler::new(),
            builder: PageRequestBuilder::new(),
        }
    }

    /// Fire one scheduled creation for `task_id`.
    ///
    /// Errors when the task no longer exists or its owner has no access
    /// grant. An unbound task is a silent no-op. A schema fetch rejected as
    /// `unauthorized`/`restricted_resource`/`object_not_found` clears the
    /// task's database binding instead of failing the run. Everything else
    /// propagates.
    pub async fn run_scheduled_creation(&self, task_id: &str) -> Result<RunOutcome, EngineError> {
        log::info!("creating scheduled page for task {}", task_id);
        let mut task =
            self.store
                .load_task(task_id)
                .await?
                .ok_or_else(|| EngineError::TaskNotFound {
                    task_id: task_id.to_string(),
                })?;

        let Some(database_id) = task.bound_database_id().map(str::to_string) else {
            log::info!("task {} has no database binding, nothing to create", task.id);
            return Ok(RunOutcome::SkippedUnbound);
        };

        let token = self
            .grants
            .access_token_for(&task.owner)
            .await?
            .ok_or_else(|| EngineError::AccessGrantMissing {
                owner: task.owner.clone(),
            })?;

        let raw = match self.schemas.fetch_database_schema(&token, &database_id).await {
            Ok(raw) => raw,
            Err(err) if err.degrades_to_unbound() => {
                log::warn!(
                    "schema for database {} unavailable ({}), unbinding task {}",
                    database_id,
                    err,
                    task.id
                );
                task.clear_database_binding();
                self.store.persist_task(&task).await?;
                return Ok(RunOutcome::BindingCleared);
            }
            Err(err) => return Err(err),
        };

        let database = self.converter.normalize_raw(&raw)?;
        let reconciled = self.reconciler.reconcile_with_title(
            &database.properties,
            &task.stored_values(),
            &task.name,
        );
        let properties = self.builder.build_create_page_properties(&reconciled);
        self.pages
            .create_page(&token, &database_id, properties)
            .await?;

        task.database_name = Some(database.name.clone());
        task.properties = reconciled.clone();
        self.store.persist_task(&task).await?;
        self.cache
            .refresh(&NormalizedDatabase {
                id: database.id,
                name: database.name,
                properties: reconciled,
            })
            .await?;

        log::debug!("created recurring page for task {}", task.id);
        Ok(RunOutcome::Created)
    }

    /// Normalization entry point for collaborators holding a raw database
    /// payload (e.g. a rendering surface listing editable properties).
    pub fn get_normalized_schema(&self, raw: &Value) -> Result<NormalizedDatabase, EngineError> {
        self.converter.normalize(raw)
    }

    /// Merge the task's stored values onto a live schema and persist the
    /// result, returning the updated descriptor list.
    pub async fn reconcile_and_save(
        &self,
        task: &mut StoredTask,
        live_schema: &NormalizedDatabase,
    ) -> Result<Vec<PropertyDescriptor>, EngineError> {
        let reconciled = self.reconciler.reconcile_with_title(
            &live_schema.properties,
            &task.stored_values(),
            &task.name,
        );
        task.properties = reconciled.clone();
        self.store.persist_task(task).await?;
        Ok(reconciled)
    }

    /// Bind the task to `database_id`, carrying compatible stored values
    /// over to the new schema.
    ///
    /// Callers must supply a non-empty database id; an empty one is the
    /// bad-request condition they surface to their user.
    pub async fn rebind_database(
        &self,
        task: &mut StoredTask,
        database_id: &str,
    ) -> Result<Vec<PropertyDescriptor>, EngineError> {
        if database_id.is_empty() {
            return Err(EngineError::EmptyDatabaseId);
        }
        let token = self
            .grants
            .access_token_for(&task.owner)
            .await?
            .ok_or_else(|| EngineError::AccessGrantMissing {
                owner: task.owner.clone(),
            })?;
        let raw = self
            .schemas
            .fetch_database_schema(&token, database_id)
            .await?;
        let database = self.converter.normalize_raw(&raw)?;
        task.database_id = Some(database_id.to_string());
        task.database_name = Some(database.name.clone());
        let updated = self.reconcile_and_save(task, &database).await?;
        self.cache
            .refresh(&NormalizedDatabase {
                id: database.id.clone(),
                name: database.name.clone(),
                properties: updated.clone(),
            })
            .await?;
        Ok(updated)
    }
}
