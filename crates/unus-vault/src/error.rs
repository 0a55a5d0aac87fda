//! Vault error types.

use thiserror::Error;
use unus_ecies::EciesError;

use crate::storage::StorageError;

/// Errors from depositing or revealing a secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Secret exceeds the configured size limit
    #[error("secret too large: {size} bytes exceeds limit of {limit}")]
    SecretTooLarge {
        /// Size of the rejected secret in bytes
        size: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Content type is not one of the accepted media types
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType {
        /// Media type that was supplied
        content_type: String,
    },

    /// No cryptogram under this id (never stored, or already revealed)
    #[error("secret {id} not found")]
    NotFound {
        /// Requested id
        id: u64,
    },

    /// Key derivation, encryption or decryption failed
    #[error("crypto error: {0}")]
    Crypto(#[from] EciesError),

    /// The cryptogram store failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Payload could not be encoded or decoded
    #[error("payload error: {0}")]
    Payload(String),
}

impl VaultError {
    /// Returns true if the secret does not exist (or no longer exists).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for a wrong passphrase or a tampered cryptogram.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Crypto(e) if e.is_authentication_failure())
    }

    /// Returns true if the caller supplied something unacceptable, as
    /// opposed to the vault failing internally.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::SecretTooLarge { .. }
            | Self::UnsupportedContentType { .. }
            | Self::NotFound { .. } => true,
            Self::Crypto(e) => matches!(
                e,
                EciesError::InvalidKeyLength { .. } | EciesError::AuthenticationFailed
            ),
            Self::Storage(_) | Self::Payload(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_predicate() {
        assert!(VaultError::NotFound { id: 1 }.is_not_found());
        assert!(!VaultError::Payload("bad".to_string()).is_not_found());
    }

    #[test]
    fn authentication_failure_predicate_looks_through_crypto() {
        assert!(VaultError::Crypto(EciesError::AuthenticationFailed).is_authentication_failure());
        assert!(!VaultError::Crypto(EciesError::InvalidKey).is_authentication_failure());
        assert!(!VaultError::NotFound { id: 1 }.is_authentication_failure());
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(VaultError::SecretTooLarge { size: 2, limit: 1 }.is_client_error());
        assert!(
            VaultError::Crypto(EciesError::InvalidKeyLength { expected: 32, actual: 4 })
                .is_client_error()
        );
        assert!(VaultError::Crypto(EciesError::AuthenticationFailed).is_client_error());
        assert!(VaultError::NotFound { id: 7 }.is_client_error());
        assert!(!VaultError::Payload("bad json".to_string()).is_client_error());
        assert!(!VaultError::Storage(StorageError::Io("disk".to_string())).is_client_error());
        assert!(
            !VaultError::Crypto(EciesError::EntropyFailure { reason: "x".to_string() })
                .is_client_error()
        );
    }

    #[test]
    fn messages_carry_context() {
        let err = VaultError::SecretTooLarge { size: 2_000_000, limit: 1_048_576 };
        assert_eq!(err.to_string(), "secret too large: 2000000 bytes exceeds limit of 1048576");

        let err = VaultError::from(EciesError::AuthenticationFailed);
        assert_eq!(err.to_string(), "crypto error: invalid key or cryptogram");
    }
}
