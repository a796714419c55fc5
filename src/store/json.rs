// src/store/json.rs
//! File-backed task store: one JSON document holding tasks and cached
//! schemas.
//!
//! Stands in for a real database behind the `TaskStore`/`SchemaCache`
//! seams so the binary is a complete tool. The whole document is held in
//! memory behind a mutex and written back atomically-enough for a
//! single-process CLI; a server deployment would implement the traits over
//! its own storage instead.

use crate::engine::{SchemaCache, StoredTask, TaskStore};
use crate::error::EngineError;
use crate::schema::NormalizedDatabase;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    tasks: Vec<StoredTask>,
    #[serde(default)]
    databases: Vec<NormalizedDatabase>,
}

pub struct JsonTaskStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonTaskStore {
    /// Open a store at `path`, starting empty when the file is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| EngineError::Storage(format!("{}: {}", path.display(), err)))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreDocument::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or replace a task, outside of any scheduled fire.
    pub fn upsert_task(&self, task: StoredTask) -> Result<(), EngineError> {
        let mut document = self.lock()?;
        match document.tasks.iter().position(|t| t.id == task.id) {
            Some(index) => document.tasks[index] = task,
            None => document.tasks.push(task),
        }
        self.write_back(&document)
    }

    /// Remove a task; the caller also drops its schedule.
    pub fn remove_task(&self, task_id: &str) -> Result<bool, EngineError> {
        let mut document = self.lock()?;
        let before = document.tasks.len();
        document.tasks.retain(|t| t.id != task_id);
        let removed = document.tasks.len() != before;
        if removed {
            self.write_back(&document)?;
        }
        Ok(removed)
    }

    /// The cached schema copy for a database, if one was ever fetched.
    pub fn cached_database(&self, database_id: &str) -> Result<Option<NormalizedDatabase>, EngineError> {
        let document = self.lock()?;
        Ok(document
            .databases
            .iter()
            .find(|db| db.id == database_id)
            .cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreDocument>, EngineError> {
        self.document
            .lock()
            .map_err(|_| EngineError::Storage("store mutex poisoned".to_string()))
    }

    fn write_back(&self, document: &StoreDocument) -> Result<(), EngineError> {
        let contents = serde_json::to_string_pretty(document)
            .map_err(|err| EngineError::Storage(err.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TaskStore for JsonTaskStore {
    async fn load_task(&self, task_id: &str) -> Result<Option<StoredTask>, EngineError> {
        let document = self.lock()?;
        Ok(document.tasks.iter().find(|t| t.id == task_id).cloned())
    }

    async fn persist_task(&self, task: &StoredTask) -> Result<(), EngineError> {
        self.upsert_task(task.clone())
    }
}

#[async_trait::async_trait]
impl SchemaCache for JsonTaskStore {
    async fn refresh(&self, database: &NormalizedDatabase) -> Result<(), EngineError> {
        let mut document = self.lock()?;
        match document.databases.iter().position(|db| db.id == database.id) {
            Some(index) => document.databases[index] = database.clone(),
            None => document.databases.push(database.clone()),
        }
        self.write_back(&document)
    }
}
