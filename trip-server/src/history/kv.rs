//! String key-value persistence interface.
//!
//! The history store treats its backing storage as an always-available,
//! synchronous, local key-value store. Two implementations: an in-memory
//! map (tests, detached sessions) and a JSON file under the data directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

/// Get/set/remove over string keys and values.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Volatile in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// Store persisted as a single JSON object in a file.
///
/// The whole map is rewritten on every change; history payloads are small.
/// Write failures are logged, not propagated: the storage model has no
/// recoverable failure path, and the in-memory copy stays authoritative
/// for the session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl FileStore {
    /// Open (or create) a file-backed store.
    ///
    /// A corrupt file is treated like malformed external input: logged and
    /// replaced with an empty store rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let map = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "store file is corrupt, starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };

        Ok(FileStore { path, map })
    }

    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.map) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize store");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "failed to write store file");
        }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.map.remove(key).is_some() {
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "v2");
        assert_eq!(store.get("k").as_deref(), Some("v2"));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("trips", "[1,2,3]");
            store.set("active", "abc");
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("trips").as_deref(), Some("[1,2,3]"));
        assert_eq!(store.get("active").as_deref(), Some("abc"));
    }

    #[test]
    fn file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("a", "1");
            store.remove("a");
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn file_store_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{{{{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v");
        assert!(path.exists());
    }
}
