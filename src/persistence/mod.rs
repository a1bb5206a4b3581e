//! Key-value persistence
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, sessions without storage)
//! - `JsonFileStore`: one JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//! - `SharedStore`: cloneable handle so several owners write through one backend
//!
//! Callers in the frame loop never propagate [`StoreError`]; they log it and
//! carry on with in-memory values.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failures
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// No backing store in this environment (or it refused access)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded/decoded
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A string key-value store
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store for environments with no storage at all; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("no storage backend".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("no storage backend".to_string()))
    }
}

/// Cloneable handle over one backend.
///
/// Snapshot backends like `JsonFileStore` rewrite every key on `set`, so two
/// independent instances over the same file lose each other's writes. Clones
/// of a `SharedStore` all see one backend instead.
#[derive(Clone)]
pub struct SharedStore {
    inner: Rc<RefCell<Box<dyn KeyValueStore>>>,
}

impl SharedStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore")
            .field("handles", &Rc::strong_count(&self.inner))
            .finish()
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner
            .try_borrow()
            .map_err(|_| StoreError::Unavailable("store busy".to_string()))?
            .get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| StoreError::Unavailable("store busy".to_string()))?
            .set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
