//! Core value types for work objects
//!
//! Fixed-width hashes, the proof-of-work nonce, location-scoped addresses and
//! the canonical byte form of the arbitrary-precision header integers.

use crate::location::Location;
use crate::{Error, Result};
use byteorder::{BigEndian, ByteOrder};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a hash in bytes (Blake2s-256)
pub const HASH_LENGTH: usize = 32;

/// Size of an address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Size of the encoded nonce in bytes
pub const NONCE_LENGTH: usize = 8;

/// Widest accepted encoding of a header integer
pub const MAX_BIG_INT_BYTES: usize = 32;

/// Decode a hex string into exactly `N` bytes.
///
/// Accepts an optional `0x` prefix. Odd-length input gets a leading zero
/// nibble and short input is left-padded with zero bytes, so
/// `"0x1"` parses to `0x00..01`. Input wider than `N` bytes keeps its
/// rightmost `N` bytes.
fn decode_hex_padded<const N: usize>(s: &str) -> Result<[u8; N]> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    }
    .map_err(|e| Error::invalid_hex(format!("{s}: {e}")))?;

    let kept = &decoded[decoded.len().saturating_sub(N)..];
    let mut bytes = [0u8; N];
    bytes[N - kept.len()..].copy_from_slice(kept);
    Ok(bytes)
}

/// A 32-byte hash value
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash([u8; HASH_LENGTH]);

impl Hash {
    /// The all-zero hash
    pub const ZERO: Hash = Hash([0u8; HASH_LENGTH]);

    /// Create a hash from raw bytes
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create a hash from a slice of exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; HASH_LENGTH] = slice
            .try_into()
            .map_err(|_| Error::invalid_length("hash", HASH_LENGTH, slice.len()))?;
        Ok(Self(bytes))
    }

    /// Parse a hash from hex, left-padding short input
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_padded::<HASH_LENGTH>(s).map(Self)
    }

    /// Get the hash bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Copy the hash into a vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// True for the all-zero hash
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_LENGTH]
    }

    /// Convert to a `0x`-prefixed hexadecimal string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; HASH_LENGTH]> for Hash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Proof-of-work nonce, encoded as 8 big-endian bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Nonce(pub u64);

impl Nonce {
    /// Create a new Nonce
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner value
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Increment the nonce by 1 in place
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Increment the nonce by 1 and return the result
    pub fn incremented(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Fixed 8-byte big-endian encoding
    pub fn to_be_bytes(self) -> [u8; NONCE_LENGTH] {
        self.0.to_be_bytes()
    }

    /// Inverse of [`Nonce::to_be_bytes`]
    pub fn from_be_bytes(bytes: [u8; NONCE_LENGTH]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }

    /// Decode from a slice of exactly 8 bytes
    pub fn from_be_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != NONCE_LENGTH {
            return Err(Error::invalid_length("nonce", NONCE_LENGTH, slice.len()));
        }
        Ok(Self(BigEndian::read_u64(slice)))
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Nonce> for u64 {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

/// Whether an address belongs to the ledger of the location it was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressScope {
    /// Address prefix names the resolving location
    Internal,
    /// Address lives on another chain of the hierarchy
    #[default]
    External,
}

/// A 20-byte address resolved against a [`Location`]
///
/// Only the raw bytes take part in hashing and encoding. The scope is
/// recomputed from the location supplied at construction or decode time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address {
    bytes: [u8; ADDRESS_LENGTH],
    scope: AddressScope,
}

impl Address {
    /// Resolve raw address bytes against a location
    pub fn new(bytes: [u8; ADDRESS_LENGTH], location: &Location) -> Self {
        let scope = if location.contains_address(&bytes) {
            AddressScope::Internal
        } else {
            AddressScope::External
        };
        Self { bytes, scope }
    }

    /// Resolve a slice of exactly 20 bytes against a location
    pub fn from_slice(slice: &[u8], location: &Location) -> Result<Self> {
        let bytes: [u8; ADDRESS_LENGTH] = slice
            .try_into()
            .map_err(|_| Error::invalid_length("address", ADDRESS_LENGTH, slice.len()))?;
        Ok(Self::new(bytes, location))
    }

    /// Parse hex (left-padding short input) and resolve against a location
    pub fn from_hex(s: &str, location: &Location) -> Result<Self> {
        decode_hex_padded::<ADDRESS_LENGTH>(s).map(|bytes| Self::new(bytes, location))
    }

    /// Get the address bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    /// Scope relative to the resolving location
    pub fn scope(&self) -> AddressScope {
        self.scope
    }

    /// True when the address belongs to the resolving location
    pub fn is_internal(&self) -> bool {
        self.scope == AddressScope::Internal
    }

    /// Convert to a `0x`-prefixed hexadecimal string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Address")
            .field("hex", &self.to_hex())
            .field("scope", &self.scope)
            .finish()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Minimal big-endian bytes of a header integer; zero encodes as no bytes
pub fn biguint_to_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Reject header integers that do not fit in [`MAX_BIG_INT_BYTES`]
pub fn check_biguint_width(field: &'static str, value: &BigUint) -> Result<()> {
    let limit = (MAX_BIG_INT_BYTES * 8) as u64;
    if value.bits() > limit {
        return Err(Error::decode(
            field,
            format!("integer is {} bits wide, limit is {}", value.bits(), limit),
        ));
    }
    Ok(())
}

/// Decode a header integer, accepting only its canonical encoding
pub fn biguint_from_bytes(field: &'static str, bytes: &[u8]) -> Result<BigUint> {
    if bytes.len() > MAX_BIG_INT_BYTES {
        return Err(Error::decode(
            field,
            format!(
                "integer is {} bytes wide, limit is {}",
                bytes.len(),
                MAX_BIG_INT_BYTES
            ),
        ));
    }
    if bytes.first() == Some(&0) {
        return Err(Error::decode(field, "non-canonical integer with leading zero byte"));
    }
    Ok(BigUint::from_bytes_be(bytes))
}
