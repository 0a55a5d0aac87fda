//! Fuzz target for Secret::from_json
//!
//! Decrypted plaintext is only trusted as far as the tag goes; the payload
//! parser must still survive anything a holder of the passphrase could seal.
//!
//! The fuzzer should NEVER panic. Anything that decodes must re-encode and
//! decode to the same secret.

#![no_main]

use libfuzzer_sys::fuzz_target;
use unus_vault::Secret;

fuzz_target!(|data: &[u8]| {
    if let Ok(secret) = Secret::from_json(data) {
        let Ok(encoded) = secret.to_json() else {
            panic!("decoded secret failed to re-encode");
        };
        assert_eq!(Secret::from_json(&encoded).ok(), Some(secret));
    }
});
