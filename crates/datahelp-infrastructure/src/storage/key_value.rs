//! Durable key/value records.
//!
//! Each key maps to one file under the store directory. Writes go through
//! [`write_atomic`] under an exclusive [`FileLock`], and file I/O runs on the
//! blocking pool. [`KeyValueStore::update`] holds that lock across the read
//! as well, so separate processes sharing a directory serialize their
//! read-modify-write cycles.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use datahelp_core::error::{DataHelpError, Result};
use tokio::sync::Mutex;

use super::file_lock::{FileLock, write_atomic};

/// Computes the next value of a record from its current one.
///
/// Returning `None` removes the record.
pub type RecordUpdate = Box<dyn FnOnce(Option<String>) -> Result<Option<String>> + Send>;

/// String records addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the record. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Reads, transforms and writes one record as a single exclusive step.
    ///
    /// No other `set`, `remove` or `update` on the same key can interleave,
    /// including from another store instance over the same directory. If
    /// `apply` fails, the record is left untouched.
    async fn update(&self, key: &str, apply: RecordUpdate) -> Result<()>;
}

fn read_record(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn delete_record(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// One file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DataHelpError::data_access(format!("Invalid record key '{}'", key)));
        }
        Ok(self.root.join(key))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DataHelpError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        blocking(move || read_record(&path)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        let value = value.to_string();
        blocking(move || {
            let _lock = FileLock::acquire(&path)?;
            write_atomic(&path, value.as_bytes())?;
            Ok(())
        })
        .await?;
        tracing::debug!(key, "[KeyValueStore] Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        blocking(move || {
            let _lock = FileLock::acquire(&path)?;
            delete_record(&path)
        })
        .await
    }

    async fn update(&self, key: &str, apply: RecordUpdate) -> Result<()> {
        let path = self.record_path(key)?;
        blocking(move || {
            let _lock = FileLock::acquire(&path)?;
            match apply(read_record(&path)?)? {
                Some(value) => write_atomic(&path, value.as_bytes())?,
                None => delete_record(&path)?,
            }
            Ok(())
        })
        .await?;
        tracing::debug!(key, "[KeyValueStore] Record updated");
        Ok(())
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.records
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.records.lock().await.remove(key);
        Ok(())
    }

    async fn update(&self, key: &str, apply: RecordUpdate) -> Result<()> {
        let mut records = self.records.lock().await;
        match apply(records.get(key).cloned())? {
            Some(value) => records.insert(key.to_string(), value),
            None => records.remove(key),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("store"));

        assert_eq!(store.get("ngo-language").await.unwrap(), None);
        store.set("ngo-language", "fr").await.unwrap();
        assert_eq!(store.get("ngo-language").await.unwrap().as_deref(), Some("fr"));

        store.remove("ngo-language").await.unwrap();
        assert_eq!(store.get("ngo-language").await.unwrap(), None);
        // removing twice is fine
        store.remove("ngo-language").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        FileKeyValueStore::new(temp_dir.path())
            .set("ngo-reports-history", "[]")
            .await
            .unwrap();

        let reopened = FileKeyValueStore::new(temp_dir.path());
        assert_eq!(
            reopened.get("ngo-reports-history").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        for key in ["", "../escape", "a/b", "with space"] {
            assert!(store.set(key, "x").await.is_err(), "accepted {key:?}");
        }
    }

    fn append_line(line: &'static str) -> RecordUpdate {
        Box::new(move |current| {
            let mut value = current.unwrap_or_default();
            value.push_str(line);
            value.push('\n');
            Ok(Some(value))
        })
    }

    #[tokio::test]
    async fn test_update_applies_to_current_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.update("log", append_line("a")).await.unwrap();
        store.update("log", append_line("b")).await.unwrap();
        assert_eq!(store.get("log").await.unwrap().as_deref(), Some("a\nb\n"));

        store.update("log", Box::new(|_| Ok(None))).await.unwrap();
        assert_eq!(store.get("log").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        store.set("log", "kept").await.unwrap();

        let result = store
            .update("log", Box::new(|_| Err(DataHelpError::internal("nope"))))
            .await;
        assert!(result.is_err());
        assert_eq!(store.get("log").await.unwrap().as_deref(), Some("kept"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_updates_from_separate_stores_are_serialized() {
        let temp_dir = TempDir::new().unwrap();

        let mut handles = Vec::new();
        for _ in 0..24 {
            let store = FileKeyValueStore::new(temp_dir.path());
            handles.push(tokio::spawn(async move {
                store.update("log", append_line("x")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let log = FileKeyValueStore::new(temp_dir.path())
            .get("log")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(log.lines().count(), 24);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.update("k", append_line("v")).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v\n"));
    }
}
