//! Opaque transaction envelope
//!
//! Work objects only need to carry, hash and root transactions. The payload
//! format belongs to the execution layer and is kept as raw bytes here.

use crate::crypto::{blake2s, EMPTY_ROOT_HASH};
use crate::proto::{ProtoTransaction, ProtoTransactions};
use crate::types::Hash;
use crate::{Error, Result};
use prost::Message;

/// Transaction type byte plus payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    tx_type: u8,
    payload: Vec<u8>,
}

impl Transaction {
    pub fn new(tx_type: u8, payload: Vec<u8>) -> Self {
        Self { tx_type, payload }
    }

    pub fn tx_type(&self) -> u8 {
        self.tx_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Blake2s-256 of the canonical encoding
    pub fn hash(&self) -> Hash {
        blake2s(&self.to_proto().encode_to_vec())
    }

    pub fn to_proto(&self) -> ProtoTransaction {
        ProtoTransaction {
            tx_type: Some(u64::from(self.tx_type)),
            payload: Some(self.payload.clone()),
        }
    }

    pub fn from_proto(proto: &ProtoTransaction) -> Result<Self> {
        let tx_type = proto.tx_type.ok_or_else(|| Error::missing("tx_type"))?;
        let tx_type = u8::try_from(tx_type)
            .map_err(|_| Error::decode("tx_type", format!("type {} does not fit in a byte", tx_type)))?;
        let payload = proto.payload.clone().ok_or_else(|| Error::missing("payload"))?;
        Ok(Self { tx_type, payload })
    }
}

pub(crate) fn transactions_to_proto(txs: &[Transaction]) -> ProtoTransactions {
    ProtoTransactions {
        transactions: txs.iter().map(Transaction::to_proto).collect(),
    }
}

pub(crate) fn transactions_from_proto(
    field: &'static str,
    proto: Option<&ProtoTransactions>,
) -> Result<Vec<Transaction>> {
    proto
        .ok_or_else(|| Error::missing(field))?
        .transactions
        .iter()
        .map(Transaction::from_proto)
        .collect()
}

/// Root of an ordered transaction list; the empty list has a fixed root
pub fn derive_tx_root(txs: &[Transaction]) -> Hash {
    if txs.is_empty() {
        return EMPTY_ROOT_HASH;
    }
    blake2s(&transactions_to_proto(txs).encode_to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_transaction_hash() {
        let tx = Transaction::new(0, vec![1, 2, 3]);
        assert_eq!(tx.hash(), tx.clone().hash());
        assert_ne!(tx.hash(), Transaction::new(1, vec![1, 2, 3]).hash());
        assert_ne!(tx.hash(), Transaction::new(0, vec![1, 2]).hash());
    }

    #[test]
    fn test_tx_root() {
        assert_eq!(derive_tx_root(&[]), EMPTY_ROOT_HASH);

        let a = Transaction::new(0, vec![0xaa]);
        let b = Transaction::new(2, vec![0xbb]);
        let forward = derive_tx_root(&[a.clone(), b.clone()]);
        assert_ne!(forward, EMPTY_ROOT_HASH);
        assert_ne!(forward, derive_tx_root(&[b, a]));
    }

    #[test]
    fn test_from_proto_validation() {
        let tx = Transaction::new(2, b"payload".to_vec());
        assert_eq!(Transaction::from_proto(&tx.to_proto()).unwrap(), tx);

        let wide = ProtoTransaction {
            tx_type: Some(256),
            payload: Some(Vec::new()),
        };
        assert_matches!(Transaction::from_proto(&wide), Err(Error::Decode { field: "tx_type", .. }));

        let missing = ProtoTransaction {
            tx_type: Some(0),
            payload: None,
        };
        assert_matches!(Transaction::from_proto(&missing), Err(Error::MissingField { field: "payload" }));
    }
}
