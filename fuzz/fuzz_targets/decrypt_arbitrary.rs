//! Fuzz target for decrypting attacker-controlled cryptograms
//!
//! Feeds arbitrary bytes to `decrypt` under a fixed receiver key.
//!
//! # Invariants
//!
//! - Decryption never panics
//! - Forged input never decrypts (the tag check rejects it)
//! - Only `TruncatedCryptogram` or `AuthenticationFailed` come back; the
//!   failing stage (point decoding, agreement, tag) is never exposed

#![no_main]

use std::num::NonZeroU32;

use libfuzzer_sys::fuzz_target;
use unus_ecies::{decrypt_with, EciesError, HashAlgorithm, PrivateKey, ProtocolConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(receiver) = PrivateKey::from_bytes(b"fuzzing-receiver-passphrase-0001") else {
        return;
    };
    let config =
        ProtocolConfig { iterations: NonZeroU32::MIN, hash: HashAlgorithm::Sha256 };

    match decrypt_with(&config, &receiver, data) {
        Ok(_) => panic!("forged cryptogram authenticated"),
        Err(EciesError::TruncatedCryptogram { .. } | EciesError::AuthenticationFailed) => {}
        Err(other) => panic!("stage-revealing error: {other:?}"),
    }
});
