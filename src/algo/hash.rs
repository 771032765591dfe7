//! Deterministic hashing utilities for unit preparation
//!
//! Provides cross-process deterministic hashing using blake3, so hashed
//! sequences prepared in different processes compare equal.

use crate::seq::Unit;

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Unlike `std::hash::Hasher`, this produces the same output across
/// process restarts for the same input.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Update with a string
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update(s.as_bytes())
    }

    /// Update with the UTF-8 encoding of a single character
    #[inline]
    pub fn update_char(self, c: char) -> Self {
        let mut buf = [0u8; 4];
        self.update(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Finish and return the hash as u64
    ///
    /// Takes the first 8 bytes of blake3 output as little-endian u64.
    #[inline]
    pub fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Finish and reinterpret the hash as a signed unit
    ///
    /// Hash units may be negative; every consumer handles signed keys.
    #[inline]
    pub fn finish_unit(self) -> Unit {
        Unit::from_le_bytes(self.finish().to_le_bytes())
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}
