//! Durable key-value storage for host-side preferences.
//!
//! Stores use interior mutability so they can be shared behind an `Arc`
//! between the bridge and whoever inspects them.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is not a JSON object of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage with `get/set/clear`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the key. Clearing an absent key is not an error.
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        (**self).clear(key)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock still holds consistent string data.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        lock(&store.values).insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.values).remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object in a single file.
///
/// A missing file reads as empty. Every write rewrites the whole file, and
/// a file that no longer parses is overwritten by the next write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Current contents for a read-modify-write. A corrupt file is replaced
    /// rather than blocking every later write.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read() {
            Err(StoreError::Json { path, source }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "preferences file is corrupt, overwriting"
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    /// Write through a temporary file in the same directory, then rename it
    /// over the target so readers never see a partial file.
    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        let mut json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = lock(&self.guard);
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = lock(&self.guard);
        let mut values = self.read_for_update()?;
        values.insert(key.to_string(), value.to_string());
        self.write(&values)
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        let _guard = lock(&self.guard);
        let mut values = self.read_for_update()?;
        if values.remove(key).is_some() {
            self.write(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.clear("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.clear("k").unwrap();
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));
        assert_eq!(store.get("glossaryPageTheme").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        JsonFileStore::new(&path).set("glossaryPageTheme", "dark").unwrap();
        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get("glossaryPageTheme").unwrap().as_deref(),
            Some("dark")
        );

        reopened.clear("glossaryPageTheme").unwrap();
        assert_eq!(JsonFileStore::new(&path).get("glossaryPageTheme").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path).get("k").unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn test_json_file_store_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{\"glossaryPageTheme\": ").unwrap();

        let store = JsonFileStore::new(&path);
        store.set("glossaryPageTheme", "light").unwrap();
        assert_eq!(store.get("glossaryPageTheme").unwrap().as_deref(), Some("light"));

        std::fs::write(&path, "not json").unwrap();
        store.clear("glossaryPageTheme").unwrap();
        assert_eq!(store.get("glossaryPageTheme").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = JsonFileStore::new(&path);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("prefs.json")]);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}\n"
        );
    }

    #[test]
    fn test_arc_store_shares_state() {
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<MemoryStore> = Arc::clone(&store);
        shared.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
