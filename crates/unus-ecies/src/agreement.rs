//! Elliptic-curve Diffie-Hellman key agreement

use p256::{AffinePoint, ProjectivePoint, elliptic_curve::sec1::ToEncodedPoint};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    error::EciesError,
    keys::{PrivateKey, PublicKey},
};

/// Size of the hashed shared secret (32 bytes)
pub const SHARED_SECRET_LEN: usize = 32;

/// Raw output of [`agree`].
///
/// This is a hash of the shared point, NOT a symmetric key. It must go
/// through the KDF before being used for encryption or authentication.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_LEN]);

impl SharedSecret {
    /// Secret bytes, for feeding into the KDF.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_LEN] {
        &self.0
    }
}

/// Perform ECDH between `private` and `public`.
///
/// Computes `d·Q`, then hashes `x ‖ y` once with SHA-256. Each coordinate is
/// written in minimal big-endian form (leading zero bytes dropped), which
/// keeps secrets compatible with previously stored cryptograms.
///
/// # Errors
///
/// - `KeyAgreementFailed`: the curves differ, or either key no longer passes
///   the on-curve check. The specific cause is not exposed.
pub fn agree(private: &PrivateKey, public: &PublicKey) -> Result<SharedSecret, EciesError> {
    if private.curve() != public.curve() {
        return Err(EciesError::KeyAgreementFailed);
    }

    let peer = public.to_point().map_err(|_| EciesError::KeyAgreementFailed)?;
    private.public_key().to_point().map_err(|_| EciesError::KeyAgreementFailed)?;

    let product = AffinePoint::from(ProjectivePoint::from(*peer.as_affine()) * **private.scalar());
    let encoded = product.to_encoded_point(false);
    let (Some(x), Some(y)) = (encoded.x(), encoded.y()) else {
        return Err(EciesError::KeyAgreementFailed);
    };

    let mut hasher = Sha256::new();
    hasher.update(strip_leading_zeros(x));
    hasher.update(strip_leading_zeros(y));
    let digest = hasher.finalize();

    let mut secret = [0u8; SHARED_SECRET_LEN];
    secret.copy_from_slice(&digest);
    Ok(SharedSecret(secret))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
