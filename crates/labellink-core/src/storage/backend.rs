//! Key-value storage backends.
//!
//! [`DeviceStore`](super::DeviceStore) persists through the
//! [`KeyValueStorage`] trait so consumers can substitute their own backend;
//! this module ships a file-backed implementation and an in-memory one.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use regex::Regex;

use crate::error::StorageError;

/// Regex for valid storage keys: alphanumeric, dash, underscore only
const KEY_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Maximum key length
const MAX_KEY_LENGTH: usize = 64;

/// Minimal key-value persistence contract.
///
/// A missing key is `Ok(None)`, never an error.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one `<key>.json` file per key.
///
/// Takes a `PathBuf` in the constructor so each consumer can provide the
/// correct storage path; [`FileStorage::in_data_dir`] picks the platform
/// data directory.
pub struct FileStorage {
    dir: PathBuf,
    key_regex: Regex,
}

impl FileStorage {
    /// Create a new FileStorage rooted at the given directory.
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(StorageError::Io)?;

        Ok(Self {
            dir,
            key_regex: Regex::new(KEY_PATTERN).unwrap(),
        })
    }

    /// Storage rooted at the platform data directory for this library.
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("", "", "labellink").ok_or_else(|| {
            StorageError::DirectoryAccess("no home directory available".to_string())
        })?;

        Self::new(dirs.data_dir().to_path_buf())
    }

    fn validate_key(&self, key: &str) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey("Key cannot be empty".to_string()));
        }

        if key.len() > MAX_KEY_LENGTH {
            return Err(StorageError::InvalidKey(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            )));
        }

        if !self.key_regex.is_match(key) {
            return Err(StorageError::InvalidKey(format!(
                "Key '{}' contains invalid characters. Only alphanumeric, dash, and underscore allowed.",
                key
            )));
        }

        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.validate_key(key)?;

        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(StorageError::Io)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.validate_key(key)?;

        std::fs::write(self.path_for(key), value).map_err(StorageError::Io)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> (FileStorage, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_set_and_get() {
        let (storage, _tmp) = create_test_storage();

        storage.set("printer", r#"{"name":"ZD410"}"#).unwrap();

        let value = storage.get("printer").unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"name":"ZD410"}"#));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (storage, _tmp) = create_test_storage();
        assert!(storage.get("never-set").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let (storage, _tmp) = create_test_storage();

        storage.set("printer", "old").unwrap();
        storage.set("printer", "new").unwrap();

        assert_eq!(storage.get("printer").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_validate_key() {
        let (storage, _tmp) = create_test_storage();

        assert!(storage.validate_key("valid-key_1").is_ok());
        assert!(storage.validate_key("").is_err());
        assert!(storage.validate_key("../etc").is_err());
        assert!(storage.validate_key("a/b").is_err());
        assert!(storage.validate_key(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::default();

        assert!(storage.get("printer").unwrap().is_none());
        storage.set("printer", "value").unwrap();
        assert_eq!(storage.get("printer").unwrap().as_deref(), Some("value"));
    }
}
