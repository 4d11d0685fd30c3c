//! Cache key sinks.
//!
//! Compare strategies push their canonical contribution into a
//! [`CacheKeySink`]. Two sinks are provided:
//!
//! - `Vec<u8>`: plain concatenation, useful to inspect the exact byte stream
//! - [`CacheKeyBuilder`]: SHA256 accumulator producing a [`CacheKey`]
//!
//! ## Determinism Guarantees
//!
//! - Same sequence of puts → same key
//! - Different split of the same bytes → different key (length-prefixed)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Receiver of cache key contributions.
///
/// Implementations are infallible and single-writer; callers sharing one sink
/// across properties hold it by `&mut`.
pub trait CacheKeySink {
    fn put_string(&mut self, value: &str);
    fn put_bytes(&mut self, value: &[u8]);
}

impl CacheKeySink for Vec<u8> {
    fn put_string(&mut self, value: &str) {
        self.extend_from_slice(value.as_bytes());
    }

    fn put_bytes(&mut self, value: &[u8]) {
        self.extend_from_slice(value);
    }
}

/// Hex-encoded SHA256 cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA256-backed cache key accumulator.
///
/// Every put is framed as a little-endian `u64` length followed by the bytes,
/// so `put_string("ab"); put_string("c")` and `put_string("a"); put_string("bc")`
/// yield different keys.
#[derive(Clone, Default)]
pub struct CacheKeyBuilder {
    hasher: Sha256,
    puts: u64,
}

impl CacheKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values pushed so far.
    pub fn puts(&self) -> u64 {
        self.puts
    }

    /// Finish the key.
    pub fn build(self) -> CacheKey {
        CacheKey(hex::encode(self.hasher.finalize()))
    }

    fn put_framed(&mut self, bytes: &[u8]) {
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self.puts += 1;
    }
}

impl CacheKeySink for CacheKeyBuilder {
    fn put_string(&mut self, value: &str) {
        self.put_framed(value.as_bytes());
    }

    fn put_bytes(&mut self, value: &[u8]) {
        self.put_framed(value);
    }
}

impl std::fmt::Debug for CacheKeyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheKeyBuilder")
            .field("puts", &self.puts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_concatenates() {
        let mut sink: Vec<u8> = Vec::new();
        sink.put_string("a.txt");
        sink.put_bytes(&[1, 2]);
        assert_eq!(sink, b"a.txt\x01\x02".to_vec());
    }

    #[test]
    fn test_builder_deterministic() {
        let mut a = CacheKeyBuilder::new();
        let mut b = CacheKeyBuilder::new();
        for sink in [&mut a, &mut b] {
            sink.put_string("a.txt");
            sink.put_bytes(&[0xde, 0xad]);
        }
        assert_eq!(a.puts(), 2);
        let key = a.build();
        assert_eq!(key, b.build());
        assert_eq!(key.as_str().len(), 64); // SHA256 hex length
    }

    #[test]
    fn test_builder_framing_separates_boundaries() {
        let mut a = CacheKeyBuilder::new();
        a.put_string("ab");
        a.put_string("c");

        let mut b = CacheKeyBuilder::new();
        b.put_string("a");
        b.put_string("bc");

        assert_ne!(a.build(), b.build());
    }

    #[test]
    fn test_empty_builder_is_sha256_of_nothing() {
        let key = CacheKeyBuilder::new().build();
        assert_eq!(
            key.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
