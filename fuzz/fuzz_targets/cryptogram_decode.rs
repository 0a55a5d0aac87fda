//! Fuzz target for Cryptogram::decode
//!
//! This fuzzer tests cryptogram decoding with arbitrary byte sequences to
//! find:
//! - Parser crashes or panics
//! - Off-by-one errors at the fixed field offsets
//!
//! The fuzzer should NEVER panic. Short inputs return `TruncatedCryptogram`;
//! everything else decodes and re-encodes to the same bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use unus_ecies::{Cryptogram, EciesError, HEADER_LEN};

fuzz_target!(|data: &[u8]| {
    match Cryptogram::decode(data) {
        Ok(cryptogram) => {
            assert!(data.len() >= HEADER_LEN);
            assert_eq!(cryptogram.ciphertext.len(), data.len() - HEADER_LEN);
            assert_eq!(cryptogram.encode(), data);
        }
        Err(EciesError::TruncatedCryptogram { expected, actual }) => {
            assert_eq!(expected, HEADER_LEN);
            assert_eq!(actual, data.len());
            assert!(actual < HEADER_LEN);
        }
        Err(other) => panic!("unexpected decode error: {other:?}"),
    }
});
