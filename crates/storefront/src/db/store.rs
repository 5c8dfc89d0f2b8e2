//! Device-local key-value storage.
//!
//! The site keeps all mutable state in one flat string-to-string map, the
//! same shape as browser local storage. Values are JSON documents written by
//! the repositories in this module's siblings; the store itself never looks
//! inside them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

/// Errors from the underlying store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not a JSON object of strings: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("store lock poisoned")]
    Poisoned,
}

/// A flat string key-value store.
///
/// Each call is atomic on its own; sequences of calls are not.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex.lock().map_err(|_| StoreError::Poisoned)
}

// =============================================================================
// In-memory store
// =============================================================================

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        lock(&self.entries)?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// A store persisted as a single JSON object file.
///
/// Every call reads the file afresh, so changes made by another process
/// (such as `market-cli store clear`) are seen on the next access. Changes
/// are written to a sibling temp file, then renamed over the original; a
/// failed write leaves the file as it was.
///
/// Calls do blocking file I/O on the calling thread. The file holds a single
/// user's data.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read, or
    /// `StoreError::Format` if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = read_entries(&path)?;

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened store file");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to the current file contents and write the result.
    ///
    /// Nothing is written when `change` returns `false`.
    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StoreError> {
        let _guard = lock(&self.write_lock)?;
        let mut entries = read_entries(&self.path)?;
        if change(&mut entries) {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

/// Read the whole map from `path`. A missing or blank file is an empty map.
fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(read_entries(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(read_entries(&self.path)?.into_keys().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("b", "2".to_string()).unwrap();
        store.set("a", "1".to_string()).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.keys().unwrap(), ["a", "b"]);

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.keys().unwrap(), ["b"]);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("campus_user", r#"{"name":"小李"}"#.to_string()).unwrap();
        store.set("gone", "x".to_string()).unwrap();
        store.remove("gone").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("campus_user").unwrap().as_deref(),
            Some(r#"{"name":"小李"}"#)
        );
        assert_eq!(reopened.keys().unwrap(), ["campus_user"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_missing_or_empty_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.keys().unwrap().is_empty());

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "  \n").unwrap();
        assert!(FileStore::open(&empty).unwrap().keys().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
    }

    #[test]
    fn test_file_store_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("user_goods", "[]".to_string()).unwrap();

        // A directory in the temp file's place makes the write fail.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        let err = store.set("user_goods", "[1]".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.get("user_goods").unwrap().as_deref(), Some("[]"));

        let err = store.remove("user_goods").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.keys().unwrap(), ["user_goods"]);

        std::fs::remove_dir(path.with_extension("json.tmp")).unwrap();
        store.set("campus_user", "{}".to_string()).unwrap();
        assert_eq!(
            FileStore::open(&path).unwrap().get("user_goods").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_file_store_sees_changes_from_other_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let server = FileStore::open(&path).unwrap();
        server.set("campus_user", r#"{"name":"a"}"#.to_string()).unwrap();
        server.set("user_goods", "[]".to_string()).unwrap();

        let cli = FileStore::open(&path).unwrap();
        cli.remove("user_goods").unwrap();
        cli.remove("campus_user").unwrap();

        assert_eq!(server.get("campus_user").unwrap(), None);

        server.set("comments_1", "[]".to_string()).unwrap();
        assert_eq!(cli.keys().unwrap(), ["comments_1"]);
    }
}
