//! Storage error types
//!
//! Backend failures are flattened to strings so the error stays `Clone` and
//! comparable regardless of which store produced it.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A cryptogram is already stored under this id
    ///
    /// Ids are never reused, so this points at a broken id generator rather
    /// than a retryable race.
    #[error("id conflict: cryptogram {id} already exists")]
    Conflict {
        /// Id that was already taken
        id: u64,
    },

    /// I/O error (file system, database, etc.)
    #[error("I/O error: {0}")]
    Io(String),
}
