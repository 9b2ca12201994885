//! Persistence port for the locally stored collections.
//!
//! Every collection lives under its own key as one JSON document, loaded
//! independently at startup and rewritten whenever it changes.
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{de::DeserializeOwned, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use tracing::{debug, error};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
pub enum StorageKey {
    #[strum(serialize = "bd_monitoring_local")]
    WorkOrders,
    #[strum(serialize = "bd_wo_counter")]
    WoCounter,
    #[strum(serialize = "bd_wo_suggest")]
    Suggestions,
    #[strum(serialize = "bd_spare_parts_catalog")]
    SpareParts,
    #[strum(serialize = "bd_production_records")]
    ProductionRecords,
    #[strum(serialize = "bd_units_data")]
    Units,
}

pub trait StateStore: Send + Sync {
    /// Returns the stored document, or `None` if the key was never written.
    fn load(&self, key: StorageKey) -> Result<Option<String>, ServiceError>;

    fn save(&self, key: StorageKey, document: &str) -> Result<(), ServiceError>;
}

/// One `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_ref()))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: StorageKey) -> Result<Option<String>, ServiceError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::StorageError(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn save(&self, key: StorageKey, document: &str) -> Result<(), ServiceError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ServiceError::StorageError(format!(
                "failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        // Write beside the target and rename so a crash never leaves half a document.
        let path = self.path(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, document)
            .and_then(|_| fs::rename(&staging, &path))
            .map_err(|e| {
                ServiceError::StorageError(format!("failed to write {}: {}", path.display(), e))
            })?;

        debug!(key = %key, bytes = document.len(), "document saved");
        Ok(())
    }
}

/// Keeps documents in memory; used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Mutex<HashMap<StorageKey, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, key: StorageKey, document: impl Into<String>) -> Self {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(key, document.into());
        }
        self
    }

    pub fn document(&self, key: StorageKey) -> Option<String> {
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(&key).cloned())
    }
}

impl StateStore for InMemoryStore {
    fn load(&self, key: StorageKey) -> Result<Option<String>, ServiceError> {
        let documents = self
            .documents
            .lock()
            .map_err(|e| ServiceError::StorageError(format!("store lock poisoned: {}", e)))?;
        Ok(documents.get(&key).cloned())
    }

    fn save(&self, key: StorageKey, document: &str) -> Result<(), ServiceError> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|e| ServiceError::StorageError(format!("store lock poisoned: {}", e)))?;
        documents.insert(key, document.to_string());
        Ok(())
    }
}

/// Loads one collection, falling back to its default when the document is
/// missing, unreadable or malformed.
pub fn load_or_default<T>(store: &dyn StateStore, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
{
    match store.load(key) {
        Ok(Some(document)) => match serde_json::from_str(&document) {
            Ok(value) => value,
            Err(e) => {
                error!(key = %key, "stored document is malformed, starting empty: {}", e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            error!(key = %key, "failed to load stored document, starting empty: {}", e);
            T::default()
        }
    }
}

pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<String, ServiceError> {
    Ok(serde_json::to_string(value)?)
}
