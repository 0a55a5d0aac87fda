//! Unus Vault
//!
//! One-time secrets on top of `unus-ecies`. A depositor seals a secret under
//! a passphrase and gets back an id; whoever presents the id and the same
//! passphrase gets the secret exactly once, after which the cryptogram is
//! destroyed.
//!
//! # Components
//!
//! - [`Secret`]: the JSON payload sealed inside each cryptogram
//! - [`IdGenerator`] / [`Snowflake`]: time-ordered storage ids
//! - [`CryptogramStore`]: opaque blob storage ([`MemoryStore`], [`RedbStore`])
//! - [`Vault`]: deposit / reveal
//!
//! The store only ever holds ciphertext. Neither passphrases nor derived
//! keys are persisted; losing the passphrase loses the secret.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod secret;
pub mod snowflake;
pub mod storage;
pub mod vault;

pub use error::VaultError;
pub use secret::{ContentType, Secret};
pub use snowflake::{Clock, EPOCH_MILLIS, IdGenerator, Snowflake, SystemClock};
pub use storage::{CryptogramStore, MemoryStore, RedbStore, StorageError};
pub use vault::{DEFAULT_MAX_SECRET_BYTES, Vault, VaultConfig};
