//! Deposit and reveal.
//!
//! # Deposit
//!
//! ```text
//! Secret ─► JSON ─► encrypt_ephemeral(pub(passphrase)) ─► store[id]
//! ```
//!
//! # Reveal
//!
//! ```text
//! store[id] ─► decrypt(priv(passphrase)) ─► JSON ─► Secret
//!                                                    │
//!                                          delete(id)┘
//! ```
//!
//! The passphrase is the only key. Sender and receiver both derive the same
//! key pair from it, so no public key is stored alongside the cryptogram.
//!
//! # Invariants
//!
//! - A secret is released at most once: reveal succeeds only if its own
//!   delete removed the cryptogram
//! - A failed reveal (wrong passphrase, tampering) leaves the cryptogram in
//!   place

use unus_ecies::{OsEntropy, PrivateKey, ProtocolConfig, decrypt_with, encrypt_ephemeral_with};
use zeroize::Zeroizing;

use crate::{
    error::VaultError,
    secret::Secret,
    snowflake::{IdGenerator, Snowflake},
    storage::CryptogramStore,
};

/// Largest accepted secret by default (1 MiB)
pub const DEFAULT_MAX_SECRET_BYTES: usize = 1024 * 1024;

/// Vault settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Largest secret, in bytes, that [`Vault::deposit`] accepts
    pub max_secret_bytes: usize,
    /// Key-derivation settings for sealing and opening
    pub protocol: ProtocolConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self { max_secret_bytes: DEFAULT_MAX_SECRET_BYTES, protocol: ProtocolConfig::default() }
    }
}

/// One-time secret vault over a [`CryptogramStore`].
pub struct Vault<S, G = Snowflake> {
    store: S,
    ids: G,
    config: VaultConfig,
}

impl<S: CryptogramStore> Vault<S> {
    /// Vault with system-clock ids and default settings.
    pub fn new(store: S) -> Self {
        Self::with_parts(store, Snowflake::new(), VaultConfig::default())
    }
}

impl<S: CryptogramStore, G: IdGenerator> Vault<S, G> {
    /// Vault with an explicit id generator and settings.
    pub fn with_parts(store: S, ids: G, config: VaultConfig) -> Self {
        Self { store, ids, config }
    }

    /// Settings in effect.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seal `secret` under `passphrase` and store it.
    ///
    /// Returns the id to reveal it with.
    ///
    /// # Errors
    ///
    /// - `SecretTooLarge`: over [`VaultConfig::max_secret_bytes`]
    /// - `Crypto`: the passphrase is shorter than 32 bytes, or encryption
    ///   failed
    /// - `Storage`: the store rejected the cryptogram
    pub fn deposit(&self, passphrase: &[u8], secret: &Secret) -> Result<u64, VaultError> {
        let size = secret.secret.len();
        if size > self.config.max_secret_bytes {
            tracing::warn!(size, limit = self.config.max_secret_bytes, "rejected oversized secret");
            return Err(VaultError::SecretTooLarge { size, limit: self.config.max_secret_bytes });
        }

        let payload = Zeroizing::new(secret.to_json()?);
        let receiver = PrivateKey::from_bytes(passphrase)?;
        let cryptogram = encrypt_ephemeral_with(
            &self.config.protocol,
            &OsEntropy,
            receiver.public_key(),
            &payload,
        )?;

        let id = self.ids.next_id();
        self.store.insert(id, &cryptogram)?;

        tracing::info!(id, content_type = %secret.content_type, size, "deposited secret");

        Ok(id)
    }

    /// Decrypt and destroy the secret stored under `id`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no such id, or another reveal already took it
    /// - `Crypto`: wrong passphrase or tampered cryptogram (the cryptogram
    ///   is kept), or a passphrase shorter than 32 bytes
    /// - `Payload`: the plaintext is not a valid secret payload
    /// - `Storage`: the store failed
    pub fn reveal(&self, id: u64, passphrase: &[u8]) -> Result<Secret, VaultError> {
        let Some(cryptogram) = self.store.fetch(id)? else {
            tracing::warn!(id, "secret not found");
            return Err(VaultError::NotFound { id });
        };

        let receiver = PrivateKey::from_bytes(passphrase)?;
        let payload = match decrypt_with(&self.config.protocol, &receiver, &cryptogram) {
            Ok(payload) => Zeroizing::new(payload),
            Err(e) => {
                if e.is_authentication_failure() {
                    tracing::warn!(id, "reveal rejected: invalid key or cryptogram");
                } else {
                    tracing::warn!(id, error = %e, "reveal failed");
                }
                return Err(e.into());
            },
        };
        let secret = Secret::from_json(&payload)?;

        if !self.store.delete(id)? {
            tracing::warn!(id, "secret revealed concurrently");
            return Err(VaultError::NotFound { id });
        }

        tracing::info!(id, content_type = %secret.content_type, "revealed secret");

        Ok(secret)
    }
}
