//! Fuzz target for tamper detection on genuine cryptograms
//!
//! Encrypts a fuzzer-chosen plaintext, applies fuzzer-chosen byte edits to
//! the authenticated regions, then decrypts.
//!
//! # Strategy
//!
//! - Arbitrary plaintext (empty, block aligned, unaligned)
//! - XOR edits anywhere in the sender key, tag, HMAC salt or ciphertext
//! - Truncation and extension of the ciphertext
//!
//! # Invariants
//!
//! - Untouched cryptograms decrypt to the original plaintext
//! - Any effective edit fails with `AuthenticationFailed`
//! - Nothing panics

#![no_main]

use std::num::NonZeroU32;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unus_ecies::{
    decrypt_with, encrypt_with, EciesError, HashAlgorithm, OsEntropy, PrivateKey,
    ProtocolConfig, HEADER_LEN,
};

#[derive(Debug, Arbitrary)]
struct TamperScenario {
    plaintext: Vec<u8>,
    edits: Vec<Edit>,
}

#[derive(Debug, Arbitrary)]
enum Edit {
    /// XOR a byte at an offset (reduced modulo the authenticated range)
    Flip { offset: usize, mask: u8 },
    /// Drop trailing ciphertext bytes
    Truncate { count: u8 },
    /// Append bytes to the ciphertext
    Extend { bytes: Vec<u8> },
}

/// Offsets whose contents the tag check depends on
fn authenticated_offsets(len: usize) -> Vec<usize> {
    (0..65).chain(81..97).chain(HEADER_LEN..len).collect()
}

fuzz_target!(|scenario: TamperScenario| {
    let config = ProtocolConfig { iterations: NonZeroU32::MIN, hash: HashAlgorithm::Sha256 };
    let (Ok(sender), Ok(receiver)) = (
        PrivateKey::from_bytes(b"fuzzing-sender-passphrase-000001"),
        PrivateKey::from_bytes(b"fuzzing-receiver-passphrase-0001"),
    ) else {
        return;
    };

    let Ok(original) =
        encrypt_with(&config, &OsEntropy, &sender, receiver.public_key(), &scenario.plaintext)
    else {
        return;
    };

    let mut cryptogram = original.clone();
    for edit in &scenario.edits {
        match edit {
            Edit::Flip { offset, mask } => {
                let offsets = authenticated_offsets(cryptogram.len());
                let index = offsets[offset % offsets.len()];
                cryptogram[index] ^= mask;
            }
            Edit::Truncate { count } => {
                let keep = cryptogram.len().saturating_sub(usize::from(*count)).max(HEADER_LEN);
                cryptogram.truncate(keep);
            }
            Edit::Extend { bytes } => cryptogram.extend_from_slice(bytes),
        }
    }

    let result = decrypt_with(&config, &receiver, &cryptogram);
    if cryptogram == original {
        assert_eq!(result.as_deref(), Ok(scenario.plaintext.as_slice()));
    } else {
        assert_eq!(result, Err(EciesError::AuthenticationFailed));
    }
});
