//! Work object body and the list roots derived from it

use super::header::WorkObjectHeader;
use crate::crypto::{blake2s, EMPTY_ROOT_HASH, EMPTY_UNCLE_HASH};
use crate::header::Header;
use crate::location::Location;
use crate::proto::convert::{hashes_from_proto, hashes_to_proto};
use crate::proto::{ProtoHashes, ProtoManifest, ProtoWorkObjectBody, ProtoWorkObjectHeaders};
use crate::transaction::{transactions_from_proto, transactions_to_proto, Transaction};
use crate::types::Hash;
use crate::{Error, Result};
use prost::Message;

/// Root of an ordered uncle list.
///
/// Uncles are hashed in full (nonce and mix hash included) in the order
/// given. Duplicates are kept.
pub fn calc_uncle_hash(uncles: &[WorkObjectHeader]) -> Hash {
    if uncles.is_empty() {
        return EMPTY_UNCLE_HASH;
    }
    let proto = ProtoWorkObjectHeaders {
        wo_headers: uncles.iter().map(WorkObjectHeader::to_proto).collect(),
    };
    blake2s(&proto.encode_to_vec())
}

/// Root of an ordered hash list such as a manifest
pub fn calc_hash_list_root(hashes: &[Hash]) -> Hash {
    if hashes.is_empty() {
        return EMPTY_ROOT_HASH;
    }
    let proto = ProtoHashes {
        hashes: hashes_to_proto(hashes),
    };
    blake2s(&proto.encode_to_vec())
}

/// Which body substructures travel on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyParts {
    /// Header and every list
    Full,
    /// Canonical header only
    HeaderOnly,
}

/// Body of a work object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkObjectBody {
    header: Header,
    uncles: Vec<WorkObjectHeader>,
    transactions: Vec<Transaction>,
    outbound_etxs: Vec<Transaction>,
    manifest: Vec<Hash>,
    interlink_hashes: Vec<Hash>,
}

impl WorkObjectBody {
    /// Body with an empty canonical header and no lists
    pub fn empty() -> Self {
        Self::default()
    }

    /// Body around a canonical header
    pub fn with_header(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Canonical header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mutable canonical header; re-propagate its hash after editing
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn set_header(&mut self, header: Header) {
        self.header = header;
    }

    /// Uncle headers in inclusion order
    pub fn uncles(&self) -> &[WorkObjectHeader] {
        &self.uncles
    }

    /// Replace the uncle list. The header's uncle root is left untouched.
    pub fn set_uncles(&mut self, uncles: Vec<WorkObjectHeader>) {
        self.uncles = uncles;
    }

    /// Transactions included in this block
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Cross-chain transactions emitted by this block
    pub fn outbound_etxs(&self) -> &[Transaction] {
        &self.outbound_etxs
    }

    pub fn set_outbound_etxs(&mut self, etxs: Vec<Transaction>) {
        self.outbound_etxs = etxs;
    }

    /// Hashes of subordinate blocks
    pub fn manifest(&self) -> &[Hash] {
        &self.manifest
    }

    pub fn set_manifest(&mut self, manifest: Vec<Hash>) {
        self.manifest = manifest;
    }

    /// Interlink hashes
    pub fn interlink_hashes(&self) -> &[Hash] {
        &self.interlink_hashes
    }

    pub fn set_interlink_hashes(&mut self, hashes: Vec<Hash>) {
        self.interlink_hashes = hashes;
    }

    /// Root of this body's uncles
    pub fn calc_uncle_hash(&self) -> Hash {
        calc_uncle_hash(&self.uncles)
    }

    pub(crate) fn to_proto(&self, parts: BodyParts) -> ProtoWorkObjectBody {
        let header = Some(self.header.to_proto());
        match parts {
            BodyParts::HeaderOnly => ProtoWorkObjectBody {
                header,
                ..Default::default()
            },
            BodyParts::Full => ProtoWorkObjectBody {
                header,
                uncles: Some(ProtoWorkObjectHeaders {
                    wo_headers: self.uncles.iter().map(WorkObjectHeader::to_proto).collect(),
                }),
                transactions: Some(transactions_to_proto(&self.transactions)),
                outbound_etxs: Some(transactions_to_proto(&self.outbound_etxs)),
                manifest: Some(ProtoManifest {
                    manifest: hashes_to_proto(&self.manifest),
                }),
                interlink_hashes: Some(ProtoHashes {
                    hashes: hashes_to_proto(&self.interlink_hashes),
                }),
            },
        }
    }

    pub(crate) fn from_proto(
        proto: &ProtoWorkObjectBody,
        location: &Location,
        parts: BodyParts,
    ) -> Result<Self> {
        let header = Header::from_proto(
            proto
                .header
                .as_ref()
                .ok_or_else(|| Error::missing("wo_body.header"))?,
        )?;
        if parts == BodyParts::HeaderOnly {
            return Ok(Self::with_header(header));
        }

        let uncles = proto
            .uncles
            .as_ref()
            .ok_or_else(|| Error::missing("uncles"))?
            .wo_headers
            .iter()
            .map(|uncle| WorkObjectHeader::from_proto(uncle, location))
            .collect::<Result<Vec<_>>>()?;
        let manifest = proto.manifest.as_ref().ok_or_else(|| Error::missing("manifest"))?;
        let interlinks = proto
            .interlink_hashes
            .as_ref()
            .ok_or_else(|| Error::missing("interlink_hashes"))?;

        Ok(Self {
            header,
            uncles,
            transactions: transactions_from_proto("transactions", proto.transactions.as_ref())?,
            outbound_etxs: transactions_from_proto("outbound_etxs", proto.outbound_etxs.as_ref())?,
            manifest: hashes_from_proto("manifest", &manifest.manifest)?,
            interlink_hashes: hashes_from_proto("interlink_hashes", &interlinks.hashes)?,
        })
    }
}
