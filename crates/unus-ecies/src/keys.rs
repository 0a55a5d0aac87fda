//! Elliptic-curve key model.
//!
//! Keys are immutable values. A [`PublicKey`] is a curve tag plus affine
//! coordinates that always satisfy the curve equation; a [`PrivateKey`] owns
//! its scalar and the public key derived from it, so the pair can never be
//! inconsistent.

use std::fmt;

use p256::{
    EncodedPoint, FieldBytes, NonZeroScalar, Scalar,
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
};
use zeroize::{Zeroize, Zeroizing};

use crate::{entropy::EntropySource, error::EciesError};

/// Size of a P-256 scalar and of each affine coordinate (32 bytes)
pub const SCALAR_LEN: usize = 32;

/// Size of a SEC1 compressed point (33 bytes)
pub const COMPRESSED_POINT_LEN: usize = 33;

/// SEC1 tag for a compressed point with even y
const TAG_EVEN: u8 = 0x02;

/// SEC1 tag for a compressed point with odd y
const TAG_ODD: u8 = 0x03;

/// Upper bound on rejection-sampling rounds in [`PrivateKey::generate`].
/// A 32-byte draw lands outside `[1, n)` with probability below 2^-32.
const MAX_GENERATION_ATTEMPTS: usize = 16;

/// Named curve a key lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (secp256r1)
    P256,
}

/// An elliptic-curve public key: a validated point on a named curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    curve: Curve,
    x: FieldBytes,
    y: FieldBytes,
}

impl PublicKey {
    /// Build a public key from raw big-endian affine coordinates.
    ///
    /// # Errors
    ///
    /// - `InvalidKey`: the coordinates do not satisfy the curve equation
    pub fn from_coordinates(
        curve: Curve,
        x: &[u8; SCALAR_LEN],
        y: &[u8; SCALAR_LEN],
    ) -> Result<Self, EciesError> {
        let key = Self { curve, x: FieldBytes::clone_from_slice(x), y: FieldBytes::clone_from_slice(y) };
        key.to_point()?;
        Ok(key)
    }

    /// Decompress a SEC1 compressed point onto `curve`.
    ///
    /// # Errors
    ///
    /// - `InvalidKey`: wrong length, unknown tag byte, or no point on the
    ///   curve has this x-coordinate
    pub fn decompress(curve: Curve, compressed: &[u8]) -> Result<Self, EciesError> {
        if compressed.len() != COMPRESSED_POINT_LEN || !matches!(compressed[0], TAG_EVEN | TAG_ODD)
        {
            return Err(EciesError::InvalidKey);
        }

        match curve {
            Curve::P256 => {
                let encoded =
                    EncodedPoint::from_bytes(compressed).map_err(|_| EciesError::InvalidKey)?;
                let point: Option<p256::PublicKey> =
                    p256::PublicKey::from_encoded_point(&encoded).into();
                let point = point.ok_or(EciesError::InvalidKey)?;

                Ok(Self::from_point(curve, &point))
            },
        }
    }

    /// SEC1 compressed encoding: `0x02 | (y & 1)` followed by x.
    pub fn compress(&self) -> [u8; COMPRESSED_POINT_LEN] {
        let mut compressed = [0u8; COMPRESSED_POINT_LEN];
        compressed[0] = TAG_EVEN | (self.y[SCALAR_LEN - 1] & 1);
        compressed[1..].copy_from_slice(&self.x);
        compressed
    }

    /// Curve this key lives on.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Big-endian x-coordinate.
    pub fn x(&self) -> &[u8] {
        &self.x
    }

    /// Big-endian y-coordinate.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Whether the stored coordinates satisfy the curve equation.
    pub fn is_on_curve(&self) -> bool {
        self.to_point().is_ok()
    }

    /// Re-validate the coordinates and lift them into a curve point.
    ///
    /// Validation runs on every call, independent of the check made at
    /// construction.
    pub(crate) fn to_point(&self) -> Result<p256::PublicKey, EciesError> {
        match self.curve {
            Curve::P256 => {
                let encoded = EncodedPoint::from_affine_coordinates(&self.x, &self.y, false);
                let point: Option<p256::PublicKey> =
                    p256::PublicKey::from_encoded_point(&encoded).into();
                point.ok_or(EciesError::InvalidKey)
            },
        }
    }

    fn from_point(curve: Curve, point: &p256::PublicKey) -> Self {
        let encoded = point.to_encoded_point(false);
        let (Some(x), Some(y)) = (encoded.x(), encoded.y()) else {
            unreachable!("uncompressed encoding of a public key carries both coordinates");
        };

        Self { curve, x: *x, y: *y }
    }
}

/// An elliptic-curve private key.
///
/// Owns the secret scalar `d` and the public key `d·G`. The scalar is
/// zeroized on drop and never printed.
#[derive(Clone)]
pub struct PrivateKey {
    d: NonZeroScalar,
    public: PublicKey,
}

impl PrivateKey {
    /// Generate a fresh key pair on P-256.
    ///
    /// # Errors
    ///
    /// - `EntropyFailure`: the source failed, or never produced a scalar in
    ///   range
    pub fn generate(entropy: &impl EntropySource) -> Result<Self, EciesError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let mut candidate = Zeroizing::new([0u8; SCALAR_LEN]);
            entropy.fill(candidate.as_mut_slice())?;

            let scalar: Option<NonZeroScalar> =
                NonZeroScalar::from_repr(FieldBytes::clone_from_slice(candidate.as_slice())).into();
            if let Some(d) = scalar {
                return Ok(Self::from_scalar(d));
            }
        }

        Err(EciesError::EntropyFailure {
            reason: format!("no scalar in range after {MAX_GENERATION_ATTEMPTS} draws"),
        })
    }

    /// Use `k` directly as the private scalar.
    ///
    /// `k` is read as a big-endian integer and reduced modulo the group
    /// order. It is not hashed or stretched first, so the same bytes always
    /// give the same key pair.
    ///
    /// # Security
    ///
    /// Low-entropy input maps directly to a predictable scalar. Callers
    /// turning passphrases into keys inherit the passphrase's entropy, no
    /// more.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: `k` is shorter than 32 bytes
    /// - `InvalidKey`: `k` reduces to zero
    pub fn from_bytes(k: &[u8]) -> Result<Self, EciesError> {
        if k.len() < SCALAR_LEN {
            return Err(EciesError::InvalidKeyLength { expected: SCALAR_LEN, actual: k.len() });
        }

        let radix = Scalar::from(256u64);
        let reduced =
            k.iter().fold(Scalar::ZERO, |acc, &byte| acc * radix + Scalar::from(u64::from(byte)));

        let scalar: Option<NonZeroScalar> = NonZeroScalar::new(reduced).into();
        let d = scalar.ok_or(EciesError::InvalidKey)?;

        Ok(Self::from_scalar(d))
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Curve this key lives on.
    pub fn curve(&self) -> Curve {
        self.public.curve
    }

    /// Raw 32-byte big-endian scalar.
    ///
    /// Only meaningful for passphrase-derived keys, where the caller already
    /// holds the material.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; SCALAR_LEN]> {
        let repr = FieldBytes::from(&self.d);
        let mut bytes = Zeroizing::new([0u8; SCALAR_LEN]);
        bytes.copy_from_slice(&repr);
        bytes
    }

    pub(crate) fn scalar(&self) -> &NonZeroScalar {
        &self.d
    }

    fn from_scalar(d: NonZeroScalar) -> Self {
        let point = p256::PublicKey::from_secret_scalar(&d);
        Self { d, public: PublicKey::from_point(Curve::P256, &point) }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("public", &self.public).finish_non_exhaustive()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
    }
}
