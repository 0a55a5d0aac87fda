//! Error types for ECIES operations

use thiserror::Error;

/// Errors from key handling, encryption and decryption.
///
/// Every error is terminal for the call that produced it. Nothing in this
/// crate retries, and a failing call never returns a partial cryptogram or
/// partial plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EciesError {
    /// Key material is shorter than the curve's scalar size
    #[error("invalid key length: expected at least {expected}, got {actual}")]
    InvalidKeyLength {
        /// Minimum accepted length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Point is not on the curve, or the encoding is malformed
    #[error("invalid key")]
    InvalidKey,

    /// Validation failed while performing Diffie-Hellman
    ///
    /// Deliberately carries no detail about which check failed.
    #[error("key agreement failed")]
    KeyAgreementFailed,

    /// Input is shorter than the fixed cryptogram prefix
    #[error("truncated cryptogram: expected at least {expected} bytes, got {actual}")]
    TruncatedCryptogram {
        /// Length of the fixed-size prefix
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Tag mismatch (tampering, wrong key, or an unusable sender key)
    #[error("invalid key or cryptogram")]
    AuthenticationFailed,

    /// Ciphertext is not block aligned or carries invalid padding
    #[error("malformed ciphertext")]
    MalformedCiphertext,

    /// The random source failed
    #[error("entropy source failed: {reason}")]
    EntropyFailure {
        /// Reason reported by the source
        reason: String,
    },
}

impl EciesError {
    /// Returns true if the caller should treat this as "wrong passphrase or
    /// tampered cryptogram".
    ///
    /// Callers must not distinguish further between these two causes.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }
}
