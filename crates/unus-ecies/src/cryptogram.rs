//! Cryptogram wire format.
//!
//! A cryptogram is the fixed-order concatenation of every artifact a
//! receiver needs:
//!
//! ```text
//! offset  len  field
//!      0   33  sender public key (SEC1 compressed)
//!     33   32  HMAC-SHA-256 tag over the ciphertext
//!     65   16  salt for the AES key
//!     81   16  salt for the HMAC key
//!     97   16  AES-CBC IV
//!    113    *  ciphertext
//! ```
//!
//! The ciphertext is always last, so it carries no length prefix: whatever
//! follows the 113-byte header is ciphertext.

use crate::{
    error::EciesError, kdf::SALT_LEN, keys::COMPRESSED_POINT_LEN, mac::TAG_LEN,
    symmetric::IV_LEN,
};

/// Length of the fixed-size prefix (113 bytes)
pub const HEADER_LEN: usize = COMPRESSED_POINT_LEN + TAG_LEN + SALT_LEN + SALT_LEN + IV_LEN;

/// Borrowed view of a cryptogram's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cryptogram<'a> {
    /// Sender's compressed public key
    pub sender_key: &'a [u8; COMPRESSED_POINT_LEN],
    /// Tag over `ciphertext`
    pub tag: &'a [u8; TAG_LEN],
    /// Salt for deriving the AES key
    pub aes_salt: &'a [u8; SALT_LEN],
    /// Salt for deriving the HMAC key
    pub hmac_salt: &'a [u8; SALT_LEN],
    /// CBC initialization vector
    pub iv: &'a [u8; IV_LEN],
    /// Padded, block-chained ciphertext
    pub ciphertext: &'a [u8],
}

impl<'a> Cryptogram<'a> {
    /// Serialize to the wire layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(self.sender_key);
        bytes.extend_from_slice(self.tag);
        bytes.extend_from_slice(self.aes_salt);
        bytes.extend_from_slice(self.hmac_salt);
        bytes.extend_from_slice(self.iv);
        bytes.extend_from_slice(self.ciphertext);

        debug_assert_eq!(bytes.len(), self.encoded_len());
        bytes
    }

    /// Split `bytes` at the fixed offsets.
    ///
    /// No field is validated here; the sender key and tag are checked during
    /// decryption.
    ///
    /// # Errors
    ///
    /// - `TruncatedCryptogram`: fewer than [`HEADER_LEN`] bytes
    pub fn decode(bytes: &'a [u8]) -> Result<Self, EciesError> {
        let truncated =
            || EciesError::TruncatedCryptogram { expected: HEADER_LEN, actual: bytes.len() };

        let (sender_key, rest) = bytes.split_first_chunk().ok_or_else(truncated)?;
        let (tag, rest) = rest.split_first_chunk().ok_or_else(truncated)?;
        let (aes_salt, rest) = rest.split_first_chunk().ok_or_else(truncated)?;
        let (hmac_salt, rest) = rest.split_first_chunk().ok_or_else(truncated)?;
        let (iv, ciphertext) = rest.split_first_chunk().ok_or_else(truncated)?;

        Ok(Self { sender_key, tag, aes_salt, hmac_salt, iv, ciphertext })
    }

    /// Total serialized length.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.ciphertext.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wire image where every header field holds a distinct marker byte.
    fn marked_bytes(ciphertext_len: usize) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0x02; COMPRESSED_POINT_LEN]);
        bytes.extend_from_slice(&[0xAA; TAG_LEN]);
        bytes.extend_from_slice(&[0xBB; SALT_LEN]);
        bytes.extend_from_slice(&[0xCC; SALT_LEN]);
        bytes.extend_from_slice(&[0xDD; IV_LEN]);
        bytes.extend(std::iter::repeat_n(0xEE, ciphertext_len));
        bytes
    }

    #[test]
    fn header_is_113_bytes() {
        assert_eq!(HEADER_LEN, 113);
    }

    #[test]
    fn decode_splits_at_fixed_offsets() {
        let bytes = marked_bytes(32);
        let cryptogram = Cryptogram::decode(&bytes).unwrap();

        assert_eq!(cryptogram.sender_key, &[0x02; COMPRESSED_POINT_LEN]);
        assert_eq!(cryptogram.tag, &[0xAA; TAG_LEN]);
        assert_eq!(cryptogram.aes_salt, &[0xBB; SALT_LEN]);
        assert_eq!(cryptogram.hmac_salt, &[0xCC; SALT_LEN]);
        assert_eq!(cryptogram.iv, &[0xDD; IV_LEN]);
        assert_eq!(cryptogram.ciphertext, &[0xEE; 32]);
    }

    #[test]
    fn field_offsets_match_layout() {
        let bytes = marked_bytes(1);

        assert_eq!(bytes[32], 0x02);
        assert_eq!(bytes[33], 0xAA);
        assert_eq!(bytes[65], 0xBB);
        assert_eq!(bytes[81], 0xCC);
        assert_eq!(bytes[97], 0xDD);
        assert_eq!(bytes[113], 0xEE);
    }

    #[test]
    fn encode_reproduces_decoded_input() {
        let bytes = marked_bytes(48);
        let cryptogram = Cryptogram::decode(&bytes).unwrap();

        assert_eq!(cryptogram.encode(), bytes);
        assert_eq!(cryptogram.encoded_len(), bytes.len());
    }

    #[test]
    fn exact_header_decodes_with_empty_ciphertext() {
        let bytes = marked_bytes(0);
        let cryptogram = Cryptogram::decode(&bytes).unwrap();

        assert!(cryptogram.ciphertext.is_empty());
    }

    #[test]
    fn short_input_is_truncated() {
        let bytes = marked_bytes(0);

        for len in [0, 1, 33, 65, 81, 97, HEADER_LEN - 1] {
            let result = Cryptogram::decode(&bytes[..len]);
            assert_eq!(
                result,
                Err(EciesError::TruncatedCryptogram { expected: HEADER_LEN, actual: len }),
                "length {len}"
            );
        }
    }
}
