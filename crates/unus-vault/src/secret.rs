//! Secret payload.
//!
//! The plaintext inside every cryptogram is a JSON object:
//!
//! ```text
//! {"ContentType": "text/plain", "Secret": "<base64 bytes>"}
//! ```
//!
//! Field names and the standard (padded) base64 alphabet are fixed so stored
//! cryptograms stay readable.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::VaultError;

/// Media types a secret may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// `text/plain`
    #[serde(rename = "text/plain")]
    TextPlain,
    /// `image/png`
    #[serde(rename = "image/png")]
    ImagePng,
    /// `image/jpeg`
    #[serde(rename = "image/jpeg")]
    ImageJpeg,
    /// `application/json`
    #[serde(rename = "application/json")]
    ApplicationJson,
}

impl ContentType {
    /// Every accepted content type.
    pub const ALL: [ContentType; 4] =
        [Self::TextPlain, Self::ImagePng, Self::ImageJpeg, Self::ApplicationJson];

    /// MIME string for this content type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::ImagePng => "image/png",
            Self::ImageJpeg => "image/jpeg",
            Self::ApplicationJson => "application/json",
        }
    }
}

impl FromStr for ContentType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|content_type| content_type.as_str() == s)
            .ok_or_else(|| VaultError::UnsupportedContentType { content_type: s.to_string() })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A secret and the media type it should be served as.
///
/// The bytes are wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "PascalCase")]
pub struct Secret {
    /// How the bytes should be interpreted
    #[zeroize(skip)]
    pub content_type: ContentType,
    /// Raw secret bytes
    #[serde(with = "base64_bytes")]
    pub secret: Vec<u8>,
}

impl Secret {
    /// Bundle secret bytes with their content type.
    pub fn new(content_type: ContentType, secret: impl Into<Vec<u8>>) -> Self {
        Self { content_type, secret: secret.into() }
    }

    /// Encode as the JSON payload.
    ///
    /// # Errors
    ///
    /// - `Payload`: serialization failed
    pub fn to_json(&self) -> Result<Vec<u8>, VaultError> {
        serde_json::to_vec(self).map_err(|e| VaultError::Payload(e.to_string()))
    }

    /// Decode from the JSON payload.
    ///
    /// # Errors
    ///
    /// - `Payload`: not valid JSON, an unknown content type, or bad base64
    pub fn from_json(bytes: &[u8]) -> Result<Self, VaultError> {
        serde_json::from_slice(bytes).map_err(|e| VaultError::Payload(e.to_string()))
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("content_type", &self.content_type)
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use zeroize::Zeroizing;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = Zeroizing::new(STANDARD.encode(bytes));
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Zeroizing::new(String::deserialize(deserializer)?);
        STANDARD.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }
}
