//! Durable key-value storage for the cart.
//!
//! The cart is written under a single namespace key. Backends only move
//! strings around; the cart store owns the format.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use thiserror::Error;

/// Namespace key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Errors raised by storage backends and by the cart's on-disk format.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored value was written by an incompatible format version.
    #[error("Unsupported cart format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The backend refused the operation (quota exceeded, disabled, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store scoped to the client.
pub trait CartStorage {
    /// Read the value stored under `key`. Missing keys yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for &T {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary sibling file first and are renamed
/// into place, so a crash or a concurrent writer never leaves a truncated cart
/// behind.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `dir`. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            path: self.dir.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;

        let path = self.path_for(key);
        tmp.persist(&path)
            .map(drop)
            .map_err(|e| StorageError::Io { path, source: e.error })
    }
}

/// Session-only storage that lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert!(storage.read(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested"));

        storage.write(CART_STORAGE_KEY, "first").unwrap();
        storage.write(CART_STORAGE_KEY, "second").unwrap();

        assert_eq!(
            storage.read(CART_STORAGE_KEY).unwrap().as_deref(),
            Some("second")
        );
        assert!(storage.path_for(CART_STORAGE_KEY).ends_with("cart-storage.json"));
    }

    #[test]
    fn test_file_storage_concurrent_writers_leave_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let values: Vec<String> = (0..8).map(|n| format!("{{\"writer\":{n}}}")).collect();

        std::thread::scope(|scope| {
            for value in &values {
                let storage = JsonFileStorage::new(dir.path());
                scope.spawn(move || {
                    for _ in 0..20 {
                        storage.write(CART_STORAGE_KEY, value).unwrap();
                    }
                });
            }
        });

        let storage = JsonFileStorage::new(dir.path());
        let stored = storage.read(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(values.contains(&stored));

        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_file_storage_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let storage = JsonFileStorage::new(&blocker);
        let err = storage.write(CART_STORAGE_KEY, "{}").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.read("k").unwrap().is_none());
        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
    }
}
