//! Persistent store adapters
//!
//! A [`SnapshotStore`] is a thin key-value contract holding the whole
//! snapshot as one string under one namespaced key. Adapters do no
//! validation; decoding is the codec's job.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::warn;

use super::file_io::{read_text, remove_file_if_exists, write_text_atomic};
use crate::config::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

/// Shared handle to a store
pub type DynSnapshotStore = Arc<dyn SnapshotStore>;

/// Durable (or not) home of the serialized snapshot
pub trait SnapshotStore: Send + Sync + fmt::Debug {
    /// Raw stored value, `None` when nothing has been saved
    fn load(&self) -> LedgerResult<Option<String>>;

    fn save(&self, raw: &str) -> LedgerResult<()>;

    fn clear(&self) -> LedgerResult<()>;

    /// False when writes are discarded
    fn is_durable(&self) -> bool {
        true
    }
}

/// Snapshot stored as `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the file store for `storage_key`, creating directories as needed
    pub fn open(paths: &LedgerPaths, storage_key: &str) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            path: paths.snapshot_file(storage_key),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> LedgerResult<Option<String>> {
        read_text(&self.path)
    }

    fn save(&self, raw: &str) -> LedgerResult<()> {
        write_text_atomic(&self.path, raw)
    }

    fn clear(&self) -> LedgerResult<()> {
        remove_file_if_exists(&self.path)
    }
}

/// Process-local key-value store
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what the service persisted.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    key: String,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store pre-populated with a raw value
    pub fn with_raw(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let store = Self::new(key);
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(store.key.clone(), raw.into());
        }
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> LedgerResult<Option<String>> {
        let entries = self.entries.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(entries.get(&self.key).cloned())
    }

    fn save(&self, raw: &str) -> LedgerResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.insert(self.key.clone(), raw.to_string());
        Ok(())
    }

    fn clear(&self) -> LedgerResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.remove(&self.key);
        Ok(())
    }
}

/// Store used when no durable medium is available; every call is a no-op
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl SnapshotStore for NullStore {
    fn load(&self) -> LedgerResult<Option<String>> {
        Ok(None)
    }

    fn save(&self, _raw: &str) -> LedgerResult<()> {
        Ok(())
    }

    fn clear(&self) -> LedgerResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}

/// Open the file store, degrading to [`NullStore`] if the medium is unusable
pub fn open_store(paths: &LedgerPaths, storage_key: &str) -> DynSnapshotStore {
    match FileStore::open(paths, storage_key) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                error = %e,
                dir = %paths.data_dir().display(),
                "durable storage unavailable; ledger changes will only live in memory"
            );
            Arc::new(NullStore)
        }
    }
}
