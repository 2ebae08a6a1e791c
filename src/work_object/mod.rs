//! Work objects and their multi-view wire codec
//!
//! A work object pairs a mining header with a body and an optional attached
//! transaction. The same object is serialized in different shapes depending
//! on where it travels; [`WorkObjectView`] selects the shape.

pub mod body;
pub mod header;

#[cfg(test)]
mod tests_hashing;
#[cfg(test)]
mod tests_property;

pub use body::{calc_hash_list_root, calc_uncle_hash, WorkObjectBody};
pub use header::{pow_hash, WorkObjectHeader, WorkObjectHeaderBuilder};

use crate::header::Header;
use crate::location::Location;
use crate::proto::ProtoWorkObject;
use crate::transaction::Transaction;
use crate::types::Hash;
use crate::{Error, Result};
use body::BodyParts;
use prost::Message;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Wire shape of a work object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkObjectView {
    /// Mining header and the full body
    Block,
    /// Same shape as `Block`, submitted as a share
    WorkShare,
    /// Mining header, canonical header and the attached transaction
    TransactionProof,
    /// Mining header and canonical header
    Header,
    /// Mining header and the attached transaction
    Transaction,
}

impl WorkObjectView {
    pub const ALL: [WorkObjectView; 5] = [
        WorkObjectView::Block,
        WorkObjectView::WorkShare,
        WorkObjectView::TransactionProof,
        WorkObjectView::Header,
        WorkObjectView::Transaction,
    ];

    fn body_parts(self) -> Option<BodyParts> {
        match self {
            WorkObjectView::Block | WorkObjectView::WorkShare => Some(BodyParts::Full),
            WorkObjectView::TransactionProof | WorkObjectView::Header => {
                Some(BodyParts::HeaderOnly)
            }
            WorkObjectView::Transaction => None,
        }
    }

    fn carries_tx(self) -> bool {
        !matches!(self, WorkObjectView::Header)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkObjectView::Block => "block",
            WorkObjectView::WorkShare => "work-share",
            WorkObjectView::TransactionProof => "transaction-proof",
            WorkObjectView::Header => "header",
            WorkObjectView::Transaction => "transaction",
        }
    }
}

impl fmt::Display for WorkObjectView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkObjectView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        WorkObjectView::ALL
            .into_iter()
            .find(|view| view.as_str() == normalized)
            .ok_or_else(|| Error::decode("view", format!("unknown view: {s}")))
    }
}

/// Mining header, body and optional attached transaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkObject {
    wo_header: WorkObjectHeader,
    body: WorkObjectBody,
    tx: Option<Transaction>,
}

impl WorkObject {
    /// Assemble a work object from its parts
    pub fn new(wo_header: WorkObjectHeader, body: WorkObjectBody, tx: Option<Transaction>) -> Self {
        Self {
            wo_header,
            body,
            tx,
        }
    }

    /// Identity hash, the mining header's hash
    pub fn hash(&self) -> Hash {
        self.wo_header.hash()
    }

    pub fn seal_hash(&self) -> Hash {
        self.wo_header.seal_hash()
    }

    pub fn wo_header(&self) -> &WorkObjectHeader {
        &self.wo_header
    }

    pub fn wo_header_mut(&mut self) -> &mut WorkObjectHeader {
        &mut self.wo_header
    }

    pub fn body(&self) -> &WorkObjectBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut WorkObjectBody {
        &mut self.body
    }

    /// Canonical header carried in the body
    pub fn header(&self) -> &Header {
        self.body.header()
    }

    pub fn tx(&self) -> Option<&Transaction> {
        self.tx.as_ref()
    }

    pub fn set_tx(&mut self, tx: Option<Transaction>) {
        self.tx = tx;
    }

    pub fn location(&self) -> Location {
        self.wo_header.location()
    }

    /// Recompute the uncle root, store it in the canonical header and
    /// propagate the new header hash into the mining header.
    pub fn refresh_uncle_hash(&mut self) {
        let uncle_hash = self.body.calc_uncle_hash();
        self.body.header_mut().set_uncle_hash(uncle_hash);
        let header_hash = self.body.header().hash();
        self.wo_header.set_header_hash(header_hash);
    }

    /// Wire form for the given view
    pub fn to_proto(&self, view: WorkObjectView) -> ProtoWorkObject {
        ProtoWorkObject {
            wo_header: Some(self.wo_header.to_proto()),
            wo_body: view.body_parts().map(|parts| self.body.to_proto(parts)),
            tx: if view.carries_tx() {
                self.tx.as_ref().map(Transaction::to_proto)
            } else {
                None
            },
        }
    }

    /// Serialize for the given view
    pub fn encode(&self, view: WorkObjectView) -> Vec<u8> {
        let bytes = self.to_proto(view).encode_to_vec();
        trace!(%view, len = bytes.len(), "encoded work object");
        bytes
    }

    /// Parse bytes in the given view. Addresses are resolved against
    /// `location`. Parts the view leaves out come back empty, and a missing
    /// attached transaction decodes as `None`.
    pub fn decode(bytes: &[u8], location: &Location, view: WorkObjectView) -> Result<Self> {
        trace!(%view, len = bytes.len(), %location, "decoding work object");
        let proto = ProtoWorkObject::decode(bytes)?;
        Self::from_proto(&proto, location, view)
    }

    pub fn from_proto(proto: &ProtoWorkObject, location: &Location, view: WorkObjectView) -> Result<Self> {
        let wo_header = WorkObjectHeader::from_proto(
            proto
                .wo_header
                .as_ref()
                .ok_or_else(|| Error::missing("wo_header"))?,
            location,
        )?;

        let body = match view.body_parts() {
            Some(parts) => WorkObjectBody::from_proto(
                proto.wo_body.as_ref().ok_or_else(|| Error::missing("wo_body"))?,
                location,
                parts,
            )?,
            None => WorkObjectBody::empty(),
        };

        let tx = match proto.tx.as_ref() {
            Some(tx) if view.carries_tx() => Some(Transaction::from_proto(tx)?),
            _ => None,
        };

        Ok(Self {
            wo_header,
            body,
            tx,
        })
    }
}
