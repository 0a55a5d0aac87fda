//! Shared-passphrase scenario at production strength
//!
//! Sender and receiver never exchange a public key. Both derive the same key
//! pair from the passphrase bytes; the sender encrypts to that public key
//! under a throwaway key, and only the sender's public half travels in the
//! cryptogram.

use unus_ecies::{
    Cryptogram, EciesError, HEADER_LEN, PrivateKey, PublicKey, decrypt, encrypt_ephemeral,
};

const PASSPHRASE: &[u8; 32] = b"01234567890123456789012345678901";
const WRONG_PASSPHRASE: &[u8; 32] = b"11234567890123456789012345678901";
const PAYLOAD: &[u8] = br#"{"ContentType":"text/plain","Secret":"hi"}"#;

#[test]
fn passphrase_derives_same_key_pair_every_time() {
    let first = PrivateKey::from_bytes(PASSPHRASE).unwrap();
    let second = PrivateKey::from_bytes(PASSPHRASE).unwrap();

    assert_eq!(first.public_key(), second.public_key());
    assert_eq!(*first.secret_bytes(), *second.secret_bytes());
}

#[test]
fn passphrase_scalar_is_the_raw_bytes() {
    // Below the group order, so no reduction happens
    let key = PrivateKey::from_bytes(PASSPHRASE).unwrap();
    assert_eq!(&*key.secret_bytes(), PASSPHRASE);
}

#[test]
fn seal_and_open_with_shared_passphrase() {
    let receiver_public = PrivateKey::from_bytes(PASSPHRASE).unwrap().public_key().clone();
    let cryptogram = encrypt_ephemeral(&receiver_public, PAYLOAD).unwrap();

    assert!(cryptogram.len() > HEADER_LEN);
    let parts = Cryptogram::decode(&cryptogram).unwrap();
    assert_ne!(parts.sender_key, &receiver_public.compress(), "sender key must be ephemeral");

    // Receiver re-derives the key from the passphrase alone
    let receiver = PrivateKey::from_bytes(PASSPHRASE).unwrap();
    let opened = decrypt(&receiver, &cryptogram).unwrap();
    assert_eq!(opened, PAYLOAD);

    let wrong = PrivateKey::from_bytes(WRONG_PASSPHRASE).unwrap();
    let result = decrypt(&wrong, &cryptogram);
    assert_eq!(result, Err(EciesError::AuthenticationFailed));
    assert!(result.unwrap_err().is_authentication_failure());
}

#[test]
fn receiver_public_key_survives_compression() {
    let public = PrivateKey::from_bytes(PASSPHRASE).unwrap().public_key().clone();
    let restored = PublicKey::decompress(public.curve(), &public.compress()).unwrap();

    assert_eq!(restored, public);
}
