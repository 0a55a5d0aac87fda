//! Unus ECIES
//!
//! Hybrid public-key encryption over NIST P-256, assembled from standard
//! primitives. A sender with the receiver's public key produces a
//! self-contained cryptogram; only the matching private key opens it.
//!
//! # Pipeline
//!
//! ```text
//! sender scalar + receiver point
//!        │
//!        ▼
//! ECDH → SHA-256(x ‖ y)            shared secret
//!        │
//!        ├── PBKDF2(aes_salt)  → AES-256-CBC key → ciphertext
//!        └── PBKDF2(hmac_salt) → HMAC-SHA-256 key → tag over ciphertext
//!        │
//!        ▼
//! sender_key ‖ tag ‖ aes_salt ‖ hmac_salt ‖ iv ‖ ciphertext
//! ```
//!
//! # Passphrase keys
//!
//! [`PrivateKey::from_bytes`] uses caller-supplied bytes directly as the
//! scalar, so two parties holding the same passphrase derive the same key
//! pair and no public key ever needs to be exchanged. The only key that
//! travels is the sender's ephemeral public key inside the cryptogram.
//!
//! The passphrase is NOT hashed or stretched before becoming a scalar. A
//! low-entropy passphrase is a low-entropy private key. Existing cryptograms
//! depend on this mapping, so it cannot change without breaking them.
//!
//! # Security
//!
//! Encrypt-then-MAC:
//! - The tag covers the ciphertext only
//! - Decryption verifies the tag before deriving the cipher key
//! - Tag comparison is constant time
//!
//! Uniform failure:
//! - A bad sender key, failed agreement and a tag mismatch all report
//!   [`EciesError::AuthenticationFailed`]
//!
//! Freshness:
//! - Both salts and the IV are drawn independently for every message
//!
//! Hygiene:
//! - Scalars, shared secrets and derived keys are zeroized when dropped

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod agreement;
pub mod cryptogram;
pub mod entropy;
pub mod error;
pub mod kdf;
pub mod keys;
pub mod mac;
pub mod protocol;
pub mod symmetric;

pub use agreement::{SharedSecret, agree};
pub use cryptogram::{Cryptogram, HEADER_LEN};
pub use entropy::{EntropySource, OsEntropy};
pub use error::EciesError;
pub use kdf::{HashAlgorithm, KdfParameters, PROTOCOL_ITERATIONS};
pub use keys::{COMPRESSED_POINT_LEN, Curve, PrivateKey, PublicKey, SCALAR_LEN};
pub use protocol::{
    ProtocolConfig, decrypt, decrypt_with, encrypt, encrypt_ephemeral, encrypt_ephemeral_with,
    encrypt_with,
};
