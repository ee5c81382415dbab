//! Key-value persistence
//!
//! The game only needs get/set of serialized strings. Browser builds use
//! LocalStorage; tests and the native build use an in-memory map.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Failure at the storage boundary
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Opaque string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
