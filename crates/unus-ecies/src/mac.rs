//! Ciphertext authentication with HMAC-SHA-256

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA-256 tag size (32 bytes)
pub const TAG_LEN: usize = 32;

/// Compute the tag over `ciphertext`.
///
/// Only the ciphertext is covered; the IV and salts are not.
pub fn tag(mac_key: &[u8], ciphertext: &[u8]) -> [u8; TAG_LEN] {
    let Ok(mut mac) = HmacSha256::new_from_slice(mac_key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac.update(ciphertext);
    let result = mac.finalize().into_bytes();

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&result);
    tag
}

/// Compare two tags in constant time.
///
/// Tags of different lengths never match.
pub fn verify(expected: &[u8], computed: &[u8]) -> bool {
    expected.ct_eq(computed).into()
}
