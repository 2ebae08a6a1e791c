//! Mining header: the proof-of-work subject of a work object
//!
//! `seal_hash` covers every field except the nonce and mix hash, so a
//! solver computes it once per template. `hash` folds the solution back in
//! and is the permanent identity of the object.

use crate::crypto::Blake2sHasher;
use crate::location::Location;
use crate::proto::convert::{
    address_from_proto, address_to_proto, hash_from_proto, hash_to_proto, location_from_proto,
    location_to_proto,
};
use crate::proto::ProtoWorkObjectHeader;
use crate::types::{biguint_from_bytes, biguint_to_bytes, check_biguint_width, Address, Hash, Nonce};
use crate::{Error, Result};
use num_bigint::BigUint;
use prost::Message;

/// Identity hash from a precomputed seal hash and a PoW solution
pub fn pow_hash(seal_hash: &Hash, nonce: Nonce, mix_hash: &Hash) -> Hash {
    let nonce = nonce.to_be_bytes();
    Blake2sHasher::new().hash_parts(&[&seal_hash.as_bytes()[..], &nonce[..], &mix_hash.as_bytes()[..]])
}

/// Mining header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkObjectHeader {
    header_hash: Hash,
    parent_hash: Hash,
    number: BigUint,
    difficulty: BigUint,
    prime_terminus_number: BigUint,
    tx_hash: Hash,
    location: Location,
    mix_hash: Hash,
    primary_coinbase: Address,
    time: u64,
    nonce: Nonce,
    lock: u8,
}

impl WorkObjectHeader {
    /// Start building a header; unset fields are zero
    pub fn builder() -> WorkObjectHeaderBuilder {
        WorkObjectHeaderBuilder::new()
    }

    /// Hash over everything except nonce and mix hash
    pub fn seal_hash(&self) -> Hash {
        Blake2sHasher::new().hash(&self.seal_encode())
    }

    /// Identity hash
    pub fn hash(&self) -> Hash {
        pow_hash(&self.seal_hash(), self.nonce, &self.mix_hash)
    }

    /// Canonical bytes behind [`WorkObjectHeader::seal_hash`]
    pub fn seal_encode(&self) -> Vec<u8> {
        let mut proto = self.to_proto();
        proto.nonce = None;
        proto.mix_hash = None;
        proto.encode_to_vec()
    }

    /// Full wire form
    pub fn to_proto(&self) -> ProtoWorkObjectHeader {
        ProtoWorkObjectHeader {
            header_hash: Some(hash_to_proto(&self.header_hash)),
            parent_hash: Some(hash_to_proto(&self.parent_hash)),
            number: Some(biguint_to_bytes(&self.number)),
            difficulty: Some(biguint_to_bytes(&self.difficulty)),
            tx_hash: Some(hash_to_proto(&self.tx_hash)),
            nonce: Some(self.nonce.value()),
            location: Some(location_to_proto(&self.location)),
            mix_hash: Some(hash_to_proto(&self.mix_hash)),
            time: Some(self.time),
            prime_terminus_number: Some(biguint_to_bytes(&self.prime_terminus_number)),
            lock: Some(u32::from(self.lock)),
            primary_coinbase: Some(address_to_proto(&self.primary_coinbase)),
        }
    }

    /// Rebuild from the wire form, resolving the coinbase against `location`
    pub fn from_proto(proto: &ProtoWorkObjectHeader, location: &Location) -> Result<Self> {
        let lock = proto.lock.ok_or_else(|| Error::missing("lock"))?;
        let lock = u8::try_from(lock)
            .map_err(|_| Error::decode("lock", format!("lock {} does not fit in a byte", lock)))?;

        Ok(Self {
            header_hash: hash_from_proto("header_hash", proto.header_hash.as_ref())?,
            parent_hash: hash_from_proto("parent_hash", proto.parent_hash.as_ref())?,
            number: big_field("number", proto.number.as_deref())?,
            difficulty: big_field("difficulty", proto.difficulty.as_deref())?,
            prime_terminus_number: big_field(
                "prime_terminus_number",
                proto.prime_terminus_number.as_deref(),
            )?,
            tx_hash: hash_from_proto("tx_hash", proto.tx_hash.as_ref())?,
            location: location_from_proto(proto.location.as_ref())?,
            mix_hash: hash_from_proto("mix_hash", proto.mix_hash.as_ref())?,
            primary_coinbase: address_from_proto(
                "primary_coinbase",
                proto.primary_coinbase.as_ref(),
                location,
            )?,
            time: proto.time.ok_or_else(|| Error::missing("time"))?,
            nonce: Nonce::new(proto.nonce.ok_or_else(|| Error::missing("nonce"))?),
            lock,
        })
    }

    /// Hash of the canonical header in the body
    pub fn header_hash(&self) -> Hash {
        self.header_hash
    }

    /// Store the canonical header hash. Call after any change to the body's
    /// header, including a new uncle root.
    pub fn set_header_hash(&mut self, hash: Hash) {
        self.header_hash = hash;
    }

    /// Identity hash of the parent work object
    pub fn parent_hash(&self) -> Hash {
        self.parent_hash
    }

    pub fn set_parent_hash(&mut self, hash: Hash) {
        self.parent_hash = hash;
    }

    /// Block number
    pub fn number(&self) -> &BigUint {
        &self.number
    }

    /// Set the block number, at most 256 bits
    pub fn set_number(&mut self, number: BigUint) -> Result<()> {
        check_biguint_width("number", &number)?;
        self.number = number;
        Ok(())
    }

    /// Proof-of-work difficulty
    pub fn difficulty(&self) -> &BigUint {
        &self.difficulty
    }

    /// Set the difficulty, at most 256 bits
    pub fn set_difficulty(&mut self, difficulty: BigUint) -> Result<()> {
        check_biguint_width("difficulty", &difficulty)?;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Number of the last prime block this object builds on
    pub fn prime_terminus_number(&self) -> &BigUint {
        &self.prime_terminus_number
    }

    /// Set the prime terminus number, at most 256 bits
    pub fn set_prime_terminus_number(&mut self, number: BigUint) -> Result<()> {
        check_biguint_width("prime_terminus_number", &number)?;
        self.prime_terminus_number = number;
        Ok(())
    }

    /// Root of the body's transaction list
    pub fn tx_hash(&self) -> Hash {
        self.tx_hash
    }

    pub fn set_tx_hash(&mut self, hash: Hash) {
        self.tx_hash = hash;
    }

    /// Chain this object was mined for
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Proof-of-work mix digest
    pub fn mix_hash(&self) -> Hash {
        self.mix_hash
    }

    pub fn set_mix_hash(&mut self, hash: Hash) {
        self.mix_hash = hash;
    }

    /// Reward recipient, scoped against the location it was decoded in
    pub fn primary_coinbase(&self) -> &Address {
        &self.primary_coinbase
    }

    pub fn set_primary_coinbase(&mut self, coinbase: Address) {
        self.primary_coinbase = coinbase;
    }

    /// Timestamp in seconds
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn set_time(&mut self, time: u64) {
        self.time = time;
    }

    /// Proof-of-work nonce
    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn set_nonce(&mut self, nonce: Nonce) {
        self.nonce = nonce;
    }

    /// Coinbase lockup selector
    pub fn lock(&self) -> u8 {
        self.lock
    }

    pub fn set_lock(&mut self, lock: u8) {
        self.lock = lock;
    }

    fn check_widths(&self) -> Result<()> {
        check_biguint_width("number", &self.number)?;
        check_biguint_width("difficulty", &self.difficulty)?;
        check_biguint_width("prime_terminus_number", &self.prime_terminus_number)
    }
}

fn big_field(field: &'static str, bytes: Option<&[u8]>) -> Result<BigUint> {
    biguint_from_bytes(field, bytes.ok_or_else(|| Error::missing(field))?)
}

/// Builder for constructing mining headers
#[derive(Debug, Clone, Default)]
pub struct WorkObjectHeaderBuilder {
    header: WorkObjectHeader,
}

impl WorkObjectHeaderBuilder {
    /// Create a new builder with every field zeroed
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash of the canonical header
    pub fn header_hash(mut self, hash: Hash) -> Self {
        self.header.header_hash = hash;
        self
    }

    pub fn parent_hash(mut self, hash: Hash) -> Self {
        self.header.parent_hash = hash;
        self
    }

    /// Block number
    pub fn number(mut self, number: impl Into<BigUint>) -> Self {
        self.header.number = number.into();
        self
    }

    /// Proof-of-work difficulty
    pub fn difficulty(mut self, difficulty: impl Into<BigUint>) -> Self {
        self.header.difficulty = difficulty.into();
        self
    }

    pub fn prime_terminus_number(mut self, number: impl Into<BigUint>) -> Self {
        self.header.prime_terminus_number = number.into();
        self
    }

    pub fn tx_hash(mut self, hash: Hash) -> Self {
        self.header.tx_hash = hash;
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.header.location = location;
        self
    }

    pub fn mix_hash(mut self, hash: Hash) -> Self {
        self.header.mix_hash = hash;
        self
    }

    pub fn primary_coinbase(mut self, coinbase: Address) -> Self {
        self.header.primary_coinbase = coinbase;
        self
    }

    pub fn time(mut self, time: u64) -> Self {
        self.header.time = time;
        self
    }

    /// Proof-of-work nonce
    pub fn nonce(mut self, nonce: Nonce) -> Self {
        self.header.nonce = nonce;
        self
    }

    pub fn lock(mut self, lock: u8) -> Self {
        self.header.lock = lock;
        self
    }

    /// Build the header, rejecting integers wider than 256 bits
    pub fn build(self) -> Result<WorkObjectHeader> {
        self.header.check_widths()?;
        Ok(self.header)
    }
}
