//! Storage abstraction for sealed cryptograms
//!
//! Trait-based abstraction over a key-value table of opaque cryptogram bytes
//! keyed by id. The store never sees plaintext or keys. The trait is
//! synchronous (no async) to keep the vault flow a plain function call.

mod error;
mod memory;
mod redb;

pub use error::StorageError;
pub use memory::MemoryStore;

pub use self::redb::RedbStore;

/// Storage for opaque cryptogram blobs
///
/// Must be Clone (shared between vault handles), Send + Sync (thread-safe),
/// and synchronous (no async methods). Implementations share internal state
/// via Arc, so clones access the same underlying storage.
pub trait CryptogramStore: Clone + Send + Sync + 'static {
    /// Store a cryptogram under a fresh id
    ///
    /// # Invariants
    ///
    /// - Pre: no cryptogram is stored under `id`
    /// - Post: `fetch(id)` returns exactly `cryptogram`
    ///
    /// # Errors
    ///
    /// - `Conflict`: `id` is already taken; the existing entry is untouched
    fn insert(&self, id: u64, cryptogram: &[u8]) -> Result<(), StorageError>;

    /// Load the cryptogram stored under `id`.
    ///
    /// Returns `None` if nothing is stored (never stored, or already
    /// deleted).
    fn fetch(&self, id: u64) -> Result<Option<Vec<u8>>, StorageError>;

    /// Remove the cryptogram stored under `id`.
    ///
    /// Returns `true` if this call removed it. Of several concurrent deletes
    /// of the same id, at most one observes `true`.
    fn delete(&self, id: u64) -> Result<bool, StorageError>;
}
