//! Durable key-value storage for cart, wishlist, and theme state.
//!
//! A small [`KvStore`] trait with a file-backed implementation; each key is
//! one JSON document. Reads are tolerant: absent or corrupt stored data loads
//! as an empty collection, never an error.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Fixed keys for persisted state.
pub mod storage_keys {
    pub const CART: &str = "shopease-cart";
    pub const WISHLIST: &str = "shopease-wishlist";
    pub const THEME: &str = "shopease-theme";
}

/// Errors writing to the store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage, the `localStorage` analog.
pub trait KvStore: Send + Sync {
    /// Read the raw value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite the value for a key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one `<key>.json` file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load a JSON list from the store.
///
/// Absent keys and unparsable values both yield an empty list; corruption is
/// logged and discarded rather than surfaced.
pub fn load_list<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Vec<T> {
    let Some(raw) = store.get(key) else {
        return Vec::new();
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(error) => {
            warn!(key, %error, "discarding corrupt stored list");
            Vec::new()
        }
    }
}

/// Save a JSON list to the store, overwriting any previous value.
///
/// # Errors
///
/// Returns [`StorageError`] if encoding or the write fails.
pub fn save_list<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}
