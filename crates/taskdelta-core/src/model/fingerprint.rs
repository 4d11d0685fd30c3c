use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Content fingerprint of one entry in a file property snapshot.
///
/// How the fingerprint is computed (file bytes, metadata, normalization) is
/// up to the implementor. Comparison is always by content, never identity.
pub trait FileFingerprint {
    /// Raw digest bytes, used when contributing to a cache key.
    fn hash_bytes(&self) -> &[u8];

    /// Whether `other` describes the same content as `self`.
    fn is_content_up_to_date(&self, other: &Self) -> bool {
        self.hash_bytes() == other.hash_bytes()
    }
}

/// Digest bytes of a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(Vec<u8>);

impl ContentHash {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a hex-encoded digest.
    ///
    /// # Errors
    ///
    /// Returns `TaskDeltaError::InvalidFingerprint` if `text` is not valid hex.
    pub fn from_hex(text: &str) -> Result<Self> {
        Ok(Self(hex::decode(text)?))
    }

    /// Hex-encoded form of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FileFingerprint for ContentHash {
    fn hash_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
