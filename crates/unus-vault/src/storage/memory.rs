use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{CryptogramStore, StorageError};

/// In-memory storage implementation for testing
///
/// All state is wrapped in Arc<Mutex<>> to allow Clone and concurrent access.
/// Thread-safe through Mutex, but uses `lock().expect()` which will panic if
/// the mutex is poisoned - acceptable for test code. All operations are O(1).
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<u64, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new empty `MemoryStore`
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cryptograms.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").len()
    }

    /// True if nothing is stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CryptogramStore for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn insert(&self, id: u64, cryptogram: &[u8]) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");

        if inner.contains_key(&id) {
            return Err(StorageError::Conflict { id });
        }
        inner.insert(id, cryptogram.to_vec());

        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn fetch(&self, id: u64) -> Result<Option<Vec<u8>>, StorageError> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        Ok(inner.get(&id).cloned())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn delete(&self, id: u64) -> Result<bool, StorageError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        Ok(inner.remove(&id).is_some())
    }
}
