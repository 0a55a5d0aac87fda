//! Encrypt / Decrypt orchestration.
//!
//! # Encrypt
//!
//! 1. ECDH between the sender's scalar and the receiver's point
//! 2. Cipher key from the shared secret and a fresh AES salt, then AES-CBC
//! 3. MAC key from the shared secret and a fresh, independent HMAC salt, then
//!    tag the ciphertext
//! 4. Emit the cryptogram with the sender's compressed public key
//!
//! # Decrypt
//!
//! The mirror image, with one asymmetry: the MAC key is derived and the tag
//! checked before the cipher key is even computed. Unauthenticated input
//! never reaches the block cipher or the padding check.
//!
//! Every call derives its keys from scratch. Nothing is cached between calls.

use std::num::NonZeroU32;

use crate::{
    agreement::agree,
    cryptogram::Cryptogram,
    entropy::{EntropySource, OsEntropy},
    error::EciesError,
    kdf::{self, DERIVED_KEY_LEN, HashAlgorithm, KdfParameters, PROTOCOL_ITERATIONS, SALT_LEN},
    keys::{PrivateKey, PublicKey},
    mac, symmetric,
};

/// KDF settings shared by both ends of a conversation.
///
/// Sender and receiver MUST agree on these. Production code uses
/// [`ProtocolConfig::default`] through [`encrypt`], [`encrypt_ephemeral`] and
/// [`decrypt`]; other values exist so tests can run with cheaper stretching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// PBKDF2 rounds per derived key
    pub iterations: NonZeroU32,
    /// Hash inside the PBKDF2 HMAC
    pub hash: HashAlgorithm,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        let Some(iterations) = NonZeroU32::new(PROTOCOL_ITERATIONS) else {
            unreachable!("protocol iteration count is non-zero");
        };
        Self { iterations, hash: HashAlgorithm::Sha256 }
    }
}

impl ProtocolConfig {
    fn kdf_parameters(&self, shared_secret: &[u8]) -> KdfParameters {
        KdfParameters::new(self.hash, shared_secret, self.iterations.get(), DERIVED_KEY_LEN)
    }
}

/// Encrypt `plaintext` from `sender` to `receiver` with the protocol
/// defaults and OS entropy.
///
/// # Errors
///
/// - `KeyAgreementFailed`: the keys are on different curves or invalid
/// - `EntropyFailure`: a salt or IV could not be drawn
pub fn encrypt(
    sender: &PrivateKey,
    receiver: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, EciesError> {
    encrypt_with(&ProtocolConfig::default(), &OsEntropy, sender, receiver, plaintext)
}

/// Encrypt with an explicit config and entropy source.
///
/// # Errors
///
/// Same as [`encrypt`].
pub fn encrypt_with(
    config: &ProtocolConfig,
    entropy: &impl EntropySource,
    sender: &PrivateKey,
    receiver: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, EciesError> {
    let shared = agree(sender, receiver)?;
    let parameters = config.kdf_parameters(shared.as_bytes());

    let aes_salt: [u8; SALT_LEN] = entropy.array()?;
    let cipher_key = kdf::derive(&parameters, &aes_salt);
    let (ciphertext, iv) = symmetric::encrypt(&cipher_key, plaintext, entropy)?;

    let hmac_salt: [u8; SALT_LEN] = entropy.array()?;
    let mac_key = kdf::derive(&parameters, &hmac_salt);
    let tag = mac::tag(&mac_key, &ciphertext);

    let sender_key = sender.public_key().compress();
    let cryptogram = Cryptogram {
        sender_key: &sender_key,
        tag: &tag,
        aes_salt: &aes_salt,
        hmac_salt: &hmac_salt,
        iv: &iv,
        ciphertext: &ciphertext,
    }
    .encode();

    tracing::debug!(
        plaintext_len = plaintext.len(),
        cryptogram_len = cryptogram.len(),
        "sealed cryptogram"
    );

    Ok(cryptogram)
}

/// Encrypt to `receiver` under a freshly generated sender key.
///
/// The sender's private key is dropped (and zeroized) before this returns;
/// only its public half travels, inside the cryptogram.
///
/// # Errors
///
/// Same as [`encrypt`].
pub fn encrypt_ephemeral(receiver: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, EciesError> {
    encrypt_ephemeral_with(&ProtocolConfig::default(), &OsEntropy, receiver, plaintext)
}

/// Ephemeral encryption with an explicit config and entropy source.
///
/// # Errors
///
/// Same as [`encrypt`].
pub fn encrypt_ephemeral_with(
    config: &ProtocolConfig,
    entropy: &impl EntropySource,
    receiver: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, EciesError> {
    let sender = PrivateKey::generate(entropy)?;
    encrypt_with(config, entropy, &sender, receiver, plaintext)
}

/// Decrypt a cryptogram addressed to `receiver` with the protocol defaults.
///
/// # Errors
///
/// - `TruncatedCryptogram`: shorter than the fixed header
/// - `AuthenticationFailed`: bad sender key, failed agreement, or tag
///   mismatch. These are indistinguishable to the caller.
/// - `MalformedCiphertext`: the tag verified but the ciphertext does not
///   unpad
pub fn decrypt(receiver: &PrivateKey, cryptogram: &[u8]) -> Result<Vec<u8>, EciesError> {
    decrypt_with(&ProtocolConfig::default(), receiver, cryptogram)
}

/// Decrypt with an explicit config.
///
/// # Errors
///
/// Same as [`decrypt`].
pub fn decrypt_with(
    config: &ProtocolConfig,
    receiver: &PrivateKey,
    cryptogram: &[u8],
) -> Result<Vec<u8>, EciesError> {
    let parts = Cryptogram::decode(cryptogram)?;

    let Ok(sender) = PublicKey::decompress(receiver.curve(), parts.sender_key) else {
        tracing::debug!(cryptogram_len = cryptogram.len(), "rejected cryptogram");
        return Err(EciesError::AuthenticationFailed);
    };
    let Ok(shared) = agree(receiver, &sender) else {
        tracing::debug!(cryptogram_len = cryptogram.len(), "rejected cryptogram");
        return Err(EciesError::AuthenticationFailed);
    };
    let parameters = config.kdf_parameters(shared.as_bytes());

    let mac_key = kdf::derive(&parameters, parts.hmac_salt);
    let computed = mac::tag(&mac_key, parts.ciphertext);
    if !mac::verify(parts.tag, &computed) {
        tracing::debug!(cryptogram_len = cryptogram.len(), "rejected cryptogram");
        return Err(EciesError::AuthenticationFailed);
    }

    let cipher_key = kdf::derive(&parameters, parts.aes_salt);
    let plaintext = symmetric::decrypt(&cipher_key, parts.iv, parts.ciphertext)?;

    tracing::debug!(
        cryptogram_len = cryptogram.len(),
        plaintext_len = plaintext.len(),
        "opened cryptogram"
    );

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU8, Ordering};

    use super::*;
    use crate::cryptogram::HEADER_LEN;

    fn fast() -> ProtocolConfig {
        ProtocolConfig { iterations: NonZeroU32::new(2).unwrap(), hash: HashAlgorithm::Sha256 }
    }

    /// Counts bytes handed out, to pin down the order of draws.
    struct CountingEntropy(AtomicU8);

    impl EntropySource for CountingEntropy {
        fn fill(&self, buffer: &mut [u8]) -> Result<(), EciesError> {
            for byte in buffer {
                *byte = self.0.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill(&self, _buffer: &mut [u8]) -> Result<(), EciesError> {
            Err(EciesError::EntropyFailure { reason: "unavailable".to_string() })
        }
    }

    #[test]
    fn default_config_uses_protocol_constants() {
        let config = ProtocolConfig::default();
        assert_eq!(config.iterations.get(), 310_000);
        assert_eq!(config.hash, HashAlgorithm::Sha256);
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();

        let cryptogram =
            encrypt_with(&fast(), &OsEntropy, &sender, receiver.public_key(), b"hello").unwrap();
        let plaintext = decrypt_with(&fast(), &receiver, &cryptogram).unwrap();

        assert_eq!(plaintext, b"hello");
    }

    #[test]
    fn cryptogram_carries_sender_public_key() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();

        let cryptogram =
            encrypt_with(&fast(), &OsEntropy, &sender, receiver.public_key(), b"x").unwrap();
        let parts = Cryptogram::decode(&cryptogram).unwrap();

        assert_eq!(parts.sender_key, &sender.public_key().compress());
        assert_eq!(parts.ciphertext.len(), 16);
        assert_eq!(cryptogram.len(), HEADER_LEN + 16);
    }

    #[test]
    fn salts_and_iv_are_drawn_in_order() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();
        let entropy = CountingEntropy(AtomicU8::new(1));

        let cryptogram =
            encrypt_with(&fast(), &entropy, &sender, receiver.public_key(), b"x").unwrap();
        let parts = Cryptogram::decode(&cryptogram).unwrap();

        // AES salt, then IV, then HMAC salt
        assert_eq!(parts.aes_salt[0], 1);
        assert_eq!(parts.iv[0], 17);
        assert_eq!(parts.hmac_salt[0], 33);
        assert_ne!(parts.aes_salt, parts.hmac_salt);
    }

    #[test]
    fn ephemeral_senders_differ_per_call() {
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();

        let first =
            encrypt_ephemeral_with(&fast(), &OsEntropy, receiver.public_key(), b"m").unwrap();
        let second =
            encrypt_ephemeral_with(&fast(), &OsEntropy, receiver.public_key(), b"m").unwrap();

        assert_ne!(first[..33], second[..33]);
        assert_eq!(decrypt_with(&fast(), &receiver, &first).unwrap(), b"m");
        assert_eq!(decrypt_with(&fast(), &receiver, &second).unwrap(), b"m");
    }

    #[test]
    fn entropy_failure_propagates() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();

        let result = encrypt_with(&fast(), &BrokenEntropy, &sender, receiver.public_key(), b"m");
        assert!(matches!(result, Err(EciesError::EntropyFailure { .. })));

        let result = encrypt_ephemeral_with(&fast(), &BrokenEntropy, receiver.public_key(), b"m");
        assert!(matches!(result, Err(EciesError::EntropyFailure { .. })));
    }

    #[test]
    fn truncated_input_reports_truncation() {
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();
        let result = decrypt_with(&fast(), &receiver, &[0u8; HEADER_LEN - 1]);

        assert_eq!(
            result,
            Err(EciesError::TruncatedCryptogram { expected: HEADER_LEN, actual: HEADER_LEN - 1 })
        );
    }

    #[test]
    fn undecodable_sender_key_is_authentication_failure() {
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let mut cryptogram =
            encrypt_with(&fast(), &OsEntropy, &sender, receiver.public_key(), b"m").unwrap();

        cryptogram[0] = 0x04;
        let result = decrypt_with(&fast(), &receiver, &cryptogram);

        assert_eq!(result, Err(EciesError::AuthenticationFailed));
    }

    #[test]
    fn wrong_receiver_is_authentication_failure() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();
        let stranger = PrivateKey::generate(&OsEntropy).unwrap();

        let cryptogram =
            encrypt_with(&fast(), &OsEntropy, &sender, receiver.public_key(), b"m").unwrap();
        let result = decrypt_with(&fast(), &stranger, &cryptogram);

        assert_eq!(result, Err(EciesError::AuthenticationFailed));
    }

    #[test]
    fn mismatched_config_is_authentication_failure() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();
        let other = ProtocolConfig { iterations: NonZeroU32::new(3).unwrap(), ..fast() };

        let cryptogram =
            encrypt_with(&fast(), &OsEntropy, &sender, receiver.public_key(), b"m").unwrap();
        let result = decrypt_with(&other, &receiver, &cryptogram);

        assert_eq!(result, Err(EciesError::AuthenticationFailed));
    }

    #[test]
    fn authenticated_bad_padding_is_malformed() {
        let sender = PrivateKey::generate(&OsEntropy).unwrap();
        let receiver = PrivateKey::generate(&OsEntropy).unwrap();
        let cryptogram =
            encrypt_with(&fast(), &OsEntropy, &sender, receiver.public_key(), b"m").unwrap();
        let parts = Cryptogram::decode(&cryptogram).unwrap();

        // Re-tag a ciphertext that is not block aligned, as a malicious sender
        // holding the shared secret could.
        let shared = agree(&sender, receiver.public_key()).unwrap();
        let parameters = fast().kdf_parameters(shared.as_bytes());
        let mac_key = kdf::derive(&parameters, parts.hmac_salt);
        let ciphertext = [0u8; 15];
        let tag = mac::tag(&mac_key, &ciphertext);

        let forged = Cryptogram { tag: &tag, ciphertext: &ciphertext, ..parts }.encode();
        let result = decrypt_with(&fast(), &receiver, &forged);

        assert_eq!(result, Err(EciesError::MalformedCiphertext));
    }
}
