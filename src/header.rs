//! Canonical per-chain block header
//!
//! The full header carried inside a work object body. Only its hash reaches
//! the mining header; everything else is bookkeeping owned by the chain
//! layers (state roots, per-level parent links, entropy, gas accounting).

use crate::crypto::{blake2s, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH};
use crate::location::{HierarchyLevel, HIERARCHY_DEPTH};
use crate::proto::convert::{hash_from_proto, hash_to_proto, hashes_to_proto, per_level};
use crate::proto::ProtoHeader;
use crate::types::{biguint_from_bytes, biguint_to_bytes, check_biguint_width, Hash};
use crate::{Error, Result};
use num_bigint::BigUint;
use prost::Message;

/// Longest accepted extra-data field
pub const MAX_EXTRA_DATA: usize = 32;

/// Canonical block header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    parent_hash: [Hash; HIERARCHY_DEPTH],
    uncle_hash: Hash,
    evm_root: Hash,
    tx_hash: Hash,
    outbound_etx_hash: Hash,
    etx_rollup_hash: Hash,
    manifest_hash: [Hash; HIERARCHY_DEPTH],
    receipt_hash: Hash,
    number: [BigUint; HIERARCHY_DEPTH],
    parent_entropy: [BigUint; HIERARCHY_DEPTH],
    parent_delta_entropy: [BigUint; HIERARCHY_DEPTH],
    gas_limit: u64,
    gas_used: u64,
    base_fee: BigUint,
    extra: Vec<u8>,
}

impl Header {
    /// Header with every root set to its empty-list value and all counters zero
    pub fn empty() -> Self {
        Self {
            parent_hash: [EMPTY_ROOT_HASH; HIERARCHY_DEPTH],
            uncle_hash: EMPTY_UNCLE_HASH,
            evm_root: EMPTY_ROOT_HASH,
            tx_hash: EMPTY_ROOT_HASH,
            outbound_etx_hash: EMPTY_ROOT_HASH,
            etx_rollup_hash: EMPTY_ROOT_HASH,
            manifest_hash: [EMPTY_ROOT_HASH; HIERARCHY_DEPTH],
            receipt_hash: EMPTY_ROOT_HASH,
            number: Default::default(),
            parent_entropy: Default::default(),
            parent_delta_entropy: Default::default(),
            gas_limit: 0,
            gas_used: 0,
            base_fee: BigUint::default(),
            extra: Vec::new(),
        }
    }

    /// Blake2s-256 of the canonical protobuf encoding
    pub fn hash(&self) -> Hash {
        blake2s(&self.to_proto().encode_to_vec())
    }

    /// Wire form
    pub fn to_proto(&self) -> ProtoHeader {
        ProtoHeader {
            parent_hash: hashes_to_proto(&self.parent_hash),
            uncle_hash: Some(hash_to_proto(&self.uncle_hash)),
            evm_root: Some(hash_to_proto(&self.evm_root)),
            tx_hash: Some(hash_to_proto(&self.tx_hash)),
            outbound_etx_hash: Some(hash_to_proto(&self.outbound_etx_hash)),
            etx_rollup_hash: Some(hash_to_proto(&self.etx_rollup_hash)),
            manifest_hash: hashes_to_proto(&self.manifest_hash),
            receipt_hash: Some(hash_to_proto(&self.receipt_hash)),
            number: self.number.iter().map(biguint_to_bytes).collect(),
            parent_entropy: self.parent_entropy.iter().map(biguint_to_bytes).collect(),
            parent_delta_entropy: self
                .parent_delta_entropy
                .iter()
                .map(biguint_to_bytes)
                .collect(),
            gas_limit: Some(self.gas_limit),
            gas_used: Some(self.gas_used),
            base_fee: Some(biguint_to_bytes(&self.base_fee)),
            extra: Some(self.extra.clone()),
        }
    }

    /// Rebuild from the wire form, rejecting missing or malformed fields
    pub fn from_proto(proto: &ProtoHeader) -> Result<Self> {
        let extra = proto.extra.clone().ok_or_else(|| Error::missing("extra"))?;
        check_extra(&extra)?;

        Ok(Self {
            parent_hash: per_level("parent_hash", &proto.parent_hash, |h| {
                hash_from_proto("parent_hash", Some(h))
            })?,
            uncle_hash: hash_from_proto("uncle_hash", proto.uncle_hash.as_ref())?,
            evm_root: hash_from_proto("evm_root", proto.evm_root.as_ref())?,
            tx_hash: hash_from_proto("tx_hash", proto.tx_hash.as_ref())?,
            outbound_etx_hash: hash_from_proto(
                "outbound_etx_hash",
                proto.outbound_etx_hash.as_ref(),
            )?,
            etx_rollup_hash: hash_from_proto("etx_rollup_hash", proto.etx_rollup_hash.as_ref())?,
            manifest_hash: per_level("manifest_hash", &proto.manifest_hash, |h| {
                hash_from_proto("manifest_hash", Some(h))
            })?,
            receipt_hash: hash_from_proto("receipt_hash", proto.receipt_hash.as_ref())?,
            number: per_level("number", &proto.number, |b| biguint_from_bytes("number", b))?,
            parent_entropy: per_level("parent_entropy", &proto.parent_entropy, |b| {
                biguint_from_bytes("parent_entropy", b)
            })?,
            parent_delta_entropy: per_level(
                "parent_delta_entropy",
                &proto.parent_delta_entropy,
                |b| biguint_from_bytes("parent_delta_entropy", b),
            )?,
            gas_limit: proto.gas_limit.ok_or_else(|| Error::missing("gas_limit"))?,
            gas_used: proto.gas_used.ok_or_else(|| Error::missing("gas_used"))?,
            base_fee: biguint_from_bytes(
                "base_fee",
                proto
                    .base_fee
                    .as_deref()
                    .ok_or_else(|| Error::missing("base_fee"))?,
            )?,
            extra,
        })
    }

    /// Parent hash at the given hierarchy level
    pub fn parent_hash(&self, level: HierarchyLevel) -> Hash {
        self.parent_hash[level.index()]
    }

    pub fn set_parent_hash(&mut self, level: HierarchyLevel, hash: Hash) {
        self.parent_hash[level.index()] = hash;
    }

    /// Root of the body's uncle list
    pub fn uncle_hash(&self) -> Hash {
        self.uncle_hash
    }

    /// Store a new uncle root. The owning mining header's `header_hash` is
    /// not updated; callers re-propagate [`Header::hash`] themselves.
    pub fn set_uncle_hash(&mut self, hash: Hash) {
        self.uncle_hash = hash;
    }

    /// State root after executing this block
    pub fn evm_root(&self) -> Hash {
        self.evm_root
    }

    pub fn set_evm_root(&mut self, hash: Hash) {
        self.evm_root = hash;
    }

    /// Root of the body's transaction list
    pub fn tx_hash(&self) -> Hash {
        self.tx_hash
    }

    pub fn set_tx_hash(&mut self, hash: Hash) {
        self.tx_hash = hash;
    }

    /// Root of the outbound ETX list
    pub fn outbound_etx_hash(&self) -> Hash {
        self.outbound_etx_hash
    }

    pub fn set_outbound_etx_hash(&mut self, hash: Hash) {
        self.outbound_etx_hash = hash;
    }

    /// Root of the ETXs rolled up since the last dominant block
    pub fn etx_rollup_hash(&self) -> Hash {
        self.etx_rollup_hash
    }

    pub fn set_etx_rollup_hash(&mut self, hash: Hash) {
        self.etx_rollup_hash = hash;
    }

    /// Manifest root at the given hierarchy level
    pub fn manifest_hash(&self, level: HierarchyLevel) -> Hash {
        self.manifest_hash[level.index()]
    }

    pub fn set_manifest_hash(&mut self, level: HierarchyLevel, hash: Hash) {
        self.manifest_hash[level.index()] = hash;
    }

    /// Root of the transaction receipts
    pub fn receipt_hash(&self) -> Hash {
        self.receipt_hash
    }

    pub fn set_receipt_hash(&mut self, hash: Hash) {
        self.receipt_hash = hash;
    }

    /// Block number at the given hierarchy level
    pub fn number(&self, level: HierarchyLevel) -> &BigUint {
        &self.number[level.index()]
    }

    /// Set the block number at a level, at most 256 bits
    pub fn set_number(&mut self, level: HierarchyLevel, number: BigUint) -> Result<()> {
        check_biguint_width("number", &number)?;
        self.number[level.index()] = number;
        Ok(())
    }

    /// Parent entropy at the given hierarchy level
    pub fn parent_entropy(&self, level: HierarchyLevel) -> &BigUint {
        &self.parent_entropy[level.index()]
    }

    /// Set the parent entropy at a level, at most 256 bits
    pub fn set_parent_entropy(&mut self, level: HierarchyLevel, entropy: BigUint) -> Result<()> {
        check_biguint_width("parent_entropy", &entropy)?;
        self.parent_entropy[level.index()] = entropy;
        Ok(())
    }

    /// Parent delta entropy at the given hierarchy level
    pub fn parent_delta_entropy(&self, level: HierarchyLevel) -> &BigUint {
        &self.parent_delta_entropy[level.index()]
    }

    /// Set the parent delta entropy at a level, at most 256 bits
    pub fn set_parent_delta_entropy(
        &mut self,
        level: HierarchyLevel,
        entropy: BigUint,
    ) -> Result<()> {
        check_biguint_width("parent_delta_entropy", &entropy)?;
        self.parent_delta_entropy[level.index()] = entropy;
        Ok(())
    }

    /// Gas limit
    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn set_gas_limit(&mut self, gas_limit: u64) {
        self.gas_limit = gas_limit;
    }

    /// Gas used
    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    pub fn set_gas_used(&mut self, gas_used: u64) {
        self.gas_used = gas_used;
    }

    /// Base fee per gas
    pub fn base_fee(&self) -> &BigUint {
        &self.base_fee
    }

    /// Set the base fee, at most 256 bits
    pub fn set_base_fee(&mut self, base_fee: BigUint) -> Result<()> {
        check_biguint_width("base_fee", &base_fee)?;
        self.base_fee = base_fee;
        Ok(())
    }

    /// Free-form extra data
    pub fn extra(&self) -> &[u8] {
        &self.extra
    }

    /// Replace the extra data, at most [`MAX_EXTRA_DATA`] bytes
    pub fn set_extra(&mut self, extra: Vec<u8>) -> Result<()> {
        check_extra(&extra)?;
        self.extra = extra;
        Ok(())
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_extra(extra: &[u8]) -> Result<()> {
    if extra.len() > MAX_EXTRA_DATA {
        return Err(Error::decode(
            "extra",
            format!("{} bytes exceeds limit of {}", extra.len(), MAX_EXTRA_DATA),
        ));
    }
    Ok(())
}
