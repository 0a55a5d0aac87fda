//! Key derivation using PBKDF2
//!
//! One ECDH output feeds two derivations with independent random salts: one
//! for the cipher key, one for the MAC key.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

/// PBKDF2 rounds used by the cryptogram protocol
pub const PROTOCOL_ITERATIONS: u32 = 310_000;

/// Length of every key derived by the protocol (32 bytes)
pub const DERIVED_KEY_LEN: usize = 32;

/// Length of each per-message salt (16 bytes)
pub const SALT_LEN: usize = 16;

/// Hash underlying the PBKDF2 HMAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// HMAC-SHA-256 (protocol default)
    #[default]
    Sha256,
    /// HMAC-SHA-384
    Sha384,
    /// HMAC-SHA-512
    Sha512,
}

/// Inputs to a derivation, minus the salt.
///
/// Immutable once built. The same parameters and salt always derive the
/// same bytes.
#[derive(Clone)]
pub struct KdfParameters {
    hash: HashAlgorithm,
    key_material: Zeroizing<Vec<u8>>,
    iterations: u32,
    length: usize,
}

impl KdfParameters {
    /// Bundle derivation parameters.
    ///
    /// # Panics
    ///
    /// Panics if `iterations` or `length` is zero. Both are fixed by the
    /// caller's code, so a zero is a programming error rather than bad
    /// input.
    pub fn new(hash: HashAlgorithm, key_material: &[u8], iterations: u32, length: usize) -> Self {
        assert!(iterations > 0, "PBKDF2 requires at least one iteration");
        assert!(length > 0, "PBKDF2 output length must be non-zero");

        Self { hash, key_material: Zeroizing::new(key_material.to_vec()), iterations, length }
    }

    /// Hash used inside the HMAC.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Number of PBKDF2 rounds.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Output length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Debug for KdfParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdfParameters")
            .field("hash", &self.hash)
            .field("iterations", &self.iterations)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Stretch the parameters' key material with `salt`.
///
/// Returns exactly `parameters.length()` bytes.
pub fn derive(parameters: &KdfParameters, salt: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut output = Zeroizing::new(vec![0u8; parameters.length]);
    let password = parameters.key_material.as_slice();

    match parameters.hash {
        HashAlgorithm::Sha256 => {
            pbkdf2_hmac::<Sha256>(password, salt, parameters.iterations, &mut output);
        },
        HashAlgorithm::Sha384 => {
            pbkdf2_hmac::<Sha384>(password, salt, parameters.iterations, &mut output);
        },
        HashAlgorithm::Sha512 => {
            pbkdf2_hmac::<Sha512>(password, salt, parameters.iterations, &mut output);
        },
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(iterations: u32) -> KdfParameters {
        KdfParameters::new(HashAlgorithm::Sha256, b"password", iterations, 32)
    }

    #[test]
    fn matches_pbkdf2_sha256_vector_one_round() {
        let derived = derive(&params(1), b"salt");
        assert_eq!(
            hex::encode(derived.as_slice()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn matches_pbkdf2_sha256_vector_4096_rounds() {
        let derived = derive(&params(4096), b"salt");
        assert_eq!(
            hex::encode(derived.as_slice()),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn derive_is_deterministic() {
        let parameters = params(100);
        let first = derive(&parameters, b"same salt");
        let second = derive(&parameters, b"same salt");

        assert_eq!(first, second, "same parameters and salt must produce same key");
    }

    #[test]
    fn different_salts_produce_independent_keys() {
        let parameters = params(100);
        let cipher_key = derive(&parameters, &[0x01; SALT_LEN]);
        let mac_key = derive(&parameters, &[0x02; SALT_LEN]);

        assert_ne!(cipher_key, mac_key, "different salts must produce different keys");
    }

    #[test]
    fn different_iterations_produce_different_keys() {
        let fewer = derive(&params(10), b"salt");
        let more = derive(&params(11), b"salt");

        assert_ne!(fewer, more);
    }

    #[test]
    fn output_length_is_honored() {
        for length in [1, 16, 32, 33, 64, 100] {
            let parameters = KdfParameters::new(HashAlgorithm::Sha512, b"secret", 2, length);
            assert_eq!(derive(&parameters, b"salt").len(), length);
        }
    }

    #[test]
    fn hash_choice_changes_output() {
        let sha256 = KdfParameters::new(HashAlgorithm::Sha256, b"secret", 5, 32);
        let sha384 = KdfParameters::new(HashAlgorithm::Sha384, b"secret", 5, 32);
        let sha512 = KdfParameters::new(HashAlgorithm::Sha512, b"secret", 5, 32);

        let a = derive(&sha256, b"salt");
        let b = derive(&sha384, b"salt");
        let c = derive(&sha512, b"salt");

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_salt_is_accepted() {
        let derived = derive(&params(3), &[]);
        assert_eq!(derived.len(), 32);
    }

    #[test]
    #[should_panic(expected = "at least one iteration")]
    fn zero_iterations_is_a_programming_error() {
        let _ = KdfParameters::new(HashAlgorithm::Sha256, b"secret", 0, 32);
    }

    #[test]
    fn debug_output_hides_key_material() {
        let parameters = KdfParameters::new(HashAlgorithm::Sha256, b"hunter2hunter2", 7, 32);
        let rendered = format!("{parameters:?}");

        assert!(rendered.contains("iterations: 7"));
        assert!(!rendered.contains("104, 117, 110"));
    }
}
