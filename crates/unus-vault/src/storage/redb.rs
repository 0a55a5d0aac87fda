//! Redb-backed durable storage implementation.
//!
//! Uses Redb's ACID transactions with Copy-on-Write for crash safety.
//! Sealed cryptograms survive process restarts until revealed.

use std::{path::Path, sync::Arc};

use redb::{Database, ReadableTable, TableDefinition};

use super::{CryptogramStore, StorageError};

/// Table: cryptograms
/// Key: cryptogram id
/// Value: cryptogram bytes as produced by the encryption core
const CRYPTOGRAMS: TableDefinition<u64, &[u8]> = TableDefinition::new("cryptograms");

/// Durable storage backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a Redb database at the given path.
    ///
    /// Creates the CRYPTOGRAMS table if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = Database::create(path.as_ref()).map_err(|e| StorageError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(CRYPTOGRAMS).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl CryptogramStore for RedbStore {
    fn insert(&self, id: u64, cryptogram: &[u8]) -> Result<(), StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        {
            let mut table =
                txn.open_table(CRYPTOGRAMS).map_err(|e| StorageError::Io(e.to_string()))?;

            if table.get(id).map_err(|e| StorageError::Io(e.to_string()))?.is_some() {
                return Err(StorageError::Conflict { id });
            }

            table.insert(id, cryptogram).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }

    fn fetch(&self, id: u64) -> Result<Option<Vec<u8>>, StorageError> {
        let txn = self.db.begin_read().map_err(|e| StorageError::Io(e.to_string()))?;

        let table = txn.open_table(CRYPTOGRAMS).map_err(|e| StorageError::Io(e.to_string()))?;

        match table.get(id).map_err(|e| StorageError::Io(e.to_string()))? {
            Some(value) => Ok(Some(value.value().to_vec())),
            None => Ok(None),
        }
    }

    fn delete(&self, id: u64) -> Result<bool, StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        let removed = {
            let mut table =
                txn.open_table(CRYPTOGRAMS).map_err(|e| StorageError::Io(e.to_string()))?;

            table.remove(id).map_err(|e| StorageError::Io(e.to_string()))?.is_some()
        };

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(removed)
    }
}
