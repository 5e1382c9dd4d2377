//! Key-Value store wrapper with automatic serialization.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Extension used for values in a directory-backed store.
const VALUE_EXTENSION: &str = "json";

/// Type-safe cache backed by an in-memory map or a directory of JSON files.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. The cache is meant to be owned by a
/// single logical actor; it is not `Sync`.
#[derive(Debug)]
pub struct Cache {
    backend: Backend,
}

#[derive(Debug)]
enum Backend {
    Memory(RefCell<BTreeMap<String, Vec<u8>>>),
    Dir(PathBuf),
}

impl Cache {
    /// Open an empty in-memory store.
    ///
    /// Nothing written here survives the process.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(RefCell::new(BTreeMap::new())),
        }
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("/tmp/torq-store")?;
    /// ```
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        if !dir.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        debug!(dir = %dir.display(), "opened directory store");
        Ok(Self {
            backend: Backend::Dir(dir.to_path_buf()),
        })
    }

    /// Root directory of a directory-backed store.
    pub fn location(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Memory(_) => None,
            Backend::Dir(dir) => Some(dir),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A stored value that does not
    /// decode as `T` is an error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let snapshot: Option<Snapshot> = cache.get("dental-cart-storage")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("dental-cart-storage", &snapshot)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }

    /// Get the raw bytes stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => Ok(map.borrow().get(key).cloned()),
            Backend::Dir(dir) => match fs::read(value_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Store raw bytes under `key`, replacing any previous value.
    ///
    /// Directory writes go through a temporary file and a rename so a reader
    /// never observes a half-written value.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                map.borrow_mut().insert(key.to_string(), bytes.to_vec());
            }
            Backend::Dir(dir) => {
                let path = value_path(dir, key);
                let tmp = path.with_extension("json.tmp");
                fs::write(&tmp, bytes)?;
                fs::rename(&tmp, &path)?;
            }
        }
        debug!(key, bytes = bytes.len(), "stored value");
        Ok(())
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.delete("dental-cart-storage")?;
    /// ```
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => {
                map.borrow_mut().remove(key);
                Ok(())
            }
            Backend::Dir(dir) => match fs::remove_file(value_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(map) => Ok(map.borrow().contains_key(key)),
            Backend::Dir(dir) => Ok(value_path(dir, key).is_file()),
        }
    }

    /// Get all keys in the cache, sorted.
    ///
    /// For a directory store these are the on-disk names, so keys containing
    /// characters outside `[A-Za-z0-9._-]` come back in their escaped form.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        match &self.backend {
            Backend::Memory(map) => Ok(map.borrow().keys().cloned().collect()),
            Backend::Dir(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().map_or(false, |e| e == VALUE_EXTENSION) {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            keys.push(stem.to_string());
                        }
                    }
                }
                keys.sort();
                Ok(keys)
            }
        }
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn value_path(dir: &Path, key: &str) -> PathBuf {
    let name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{}.{}", name, VALUE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        items: Vec<String>,
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            items: vec!["525350100".to_string(), "580760".to_string()],
        }
    }

    #[test]
    fn test_memory_set_get_delete() {
        let cache = Cache::in_memory();
        assert!(cache.get::<Snapshot>("cart").unwrap().is_none());

        cache.set("cart", &snapshot()).unwrap();
        assert!(cache.exists("cart").unwrap());
        assert_eq!(cache.get::<Snapshot>("cart").unwrap(), Some(snapshot()));

        cache.delete("cart").unwrap();
        assert!(!cache.exists("cart").unwrap());
        // Second delete is a no-op.
        cache.delete("cart").unwrap();
    }

    #[test]
    fn test_dir_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();

        let cache = Cache::open_dir(tmp.path()).unwrap();
        cache.set("dental-cart-storage", &snapshot()).unwrap();
        drop(cache);

        let reopened = Cache::open_dir(tmp.path()).unwrap();
        assert_eq!(
            reopened.get::<Snapshot>("dental-cart-storage").unwrap(),
            Some(snapshot())
        );
        assert_eq!(reopened.keys().unwrap(), vec!["dental-cart-storage"]);
        assert_eq!(reopened.location(), Some(tmp.path()));
    }

    #[test]
    fn test_dir_missing_key_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(tmp.path()).unwrap();
        assert!(cache.get::<Snapshot>("nothing").unwrap().is_none());
        cache.delete("nothing").unwrap();
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.set_raw("cart", b"{not json").unwrap();

        let result = cache.get::<Snapshot>("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_empty_key_rejected() {
        let cache = Cache::in_memory();
        assert!(matches!(
            cache.set("  ", &snapshot()),
            Err(CacheError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_dir_key_is_escaped() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(tmp.path()).unwrap();
        cache.set("cart/user:1", &snapshot()).unwrap();

        assert!(tmp.path().join("cart_user_1.json").is_file());
        assert_eq!(cache.get::<Snapshot>("cart/user:1").unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_open_dir_on_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain-file");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            Cache::open_dir(&file),
            Err(CacheError::OpenError(_))
        ));
    }
}
