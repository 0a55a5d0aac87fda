//! AES-256-CBC with PKCS#7 padding
//!
//! A fresh IV is drawn for every call to [`encrypt`]. [`decrypt`] does not
//! authenticate anything: callers MUST verify the tag over the ciphertext
//! before handing it here.

use aes::Aes256;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};

use crate::{entropy::EntropySource, error::EciesError};

/// AES block size (16 bytes)
pub const BLOCK_SIZE: usize = 16;

/// Initialization vector size (16 bytes)
pub const IV_LEN: usize = BLOCK_SIZE;

/// AES-256 key size (32 bytes)
pub const KEY_LEN: usize = 32;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Pad and encrypt `plaintext` under `key` with a random IV.
///
/// Padding always adds between 1 and 16 bytes, so block-aligned plaintext
/// gains one full block. The returned ciphertext length is therefore
/// `(plaintext.len() / 16 + 1) * 16`.
///
/// # Errors
///
/// - `InvalidKeyLength`: `key` is not 32 bytes
/// - `EntropyFailure`: no IV could be drawn
pub fn encrypt(
    key: &[u8],
    plaintext: &[u8],
    entropy: &impl EntropySource,
) -> Result<(Vec<u8>, [u8; IV_LEN]), EciesError> {
    check_key(key)?;
    let iv: [u8; IV_LEN] = entropy.array()?;

    let cipher = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|_| EciesError::InvalidKeyLength { expected: KEY_LEN, actual: key.len() })?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok((ciphertext, iv))
}

/// Decrypt `ciphertext` and strip its padding.
///
/// # Errors
///
/// - `InvalidKeyLength`: `key` is not 32 bytes
/// - `MalformedCiphertext`: the ciphertext is empty, not block aligned, or
///   ends in invalid padding
pub fn decrypt(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, EciesError> {
    check_key(key)?;

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|_| EciesError::InvalidKeyLength { expected: KEY_LEN, actual: key.len() })?;

    cipher.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).map_err(|_| EciesError::MalformedCiphertext)
}

fn check_key(key: &[u8]) -> Result<(), EciesError> {
    if key.len() == KEY_LEN {
        Ok(())
    } else {
        Err(EciesError::InvalidKeyLength { expected: KEY_LEN, actual: key.len() })
    }
}
