//! Cryptographic utilities for work object hashing
//!
//! Blake2s-256 is the single hash primitive behind header hashes, seal hashes
//! and list roots.

use crate::types::Hash;
use blake2::{Blake2s256, Digest};

/// Root of an empty transaction or hash list
pub const EMPTY_ROOT_HASH: Hash = Hash::new([
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6,
    0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0,
    0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
]);

/// Root of an empty uncle list
pub const EMPTY_UNCLE_HASH: Hash = Hash::new([
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a,
    0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4, 0x1a,
    0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13,
    0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4, 0x93, 0x47,
]);

/// Reusable Blake2s hasher
pub struct Blake2sHasher {
    hasher: Blake2s256,
}

impl Blake2sHasher {
    /// Create a new Blake2s hasher
    pub fn new() -> Self {
        Self {
            hasher: Blake2s256::new(),
        }
    }

    /// Hash data and return the result
    pub fn hash(&mut self, data: &[u8]) -> Hash {
        self.hasher.update(data);
        let digest: [u8; 32] = self.hasher.finalize_reset().into();
        Hash::new(digest)
    }

    /// Hash the concatenation of several byte strings
    pub fn hash_parts(&mut self, parts: &[&[u8]]) -> Hash {
        for part in parts {
            self.hasher.update(part);
        }
        let digest: [u8; 32] = self.hasher.finalize_reset().into();
        Hash::new(digest)
    }
}

impl Default for Blake2sHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot Blake2s-256
pub fn blake2s(data: &[u8]) -> Hash {
    let digest: [u8; 32] = Blake2s256::digest(data).into();
    Hash::new(digest)
}
