//! Protobuf wire schema
//!
//! Messages are declared with `prost` derive macros instead of generated from
//! `.proto` files. Tag numbers are part of the consensus encoding and must
//! never be renumbered.

/// A 32-byte hash
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHash {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

/// Ordered list of hashes
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHashes {
    #[prost(message, repeated, tag = "1")]
    pub hashes: Vec<ProtoHash>,
}

/// Location coordinates, one byte each
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLocation {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

/// A 20-byte address
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAddress {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

/// Mining header. The seal encoding is this message with `nonce` and
/// `mix_hash` left unset.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectHeader {
    #[prost(message, optional, tag = "1")]
    pub header_hash: Option<ProtoHash>,
    #[prost(message, optional, tag = "2")]
    pub parent_hash: Option<ProtoHash>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub number: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub difficulty: Option<Vec<u8>>,
    #[prost(message, optional, tag = "5")]
    pub tx_hash: Option<ProtoHash>,
    #[prost(uint64, optional, tag = "6")]
    pub nonce: Option<u64>,
    #[prost(message, optional, tag = "7")]
    pub location: Option<ProtoLocation>,
    #[prost(message, optional, tag = "8")]
    pub mix_hash: Option<ProtoHash>,
    #[prost(uint64, optional, tag = "9")]
    pub time: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "10")]
    pub prime_terminus_number: Option<Vec<u8>>,
    #[prost(uint32, optional, tag = "11")]
    pub lock: Option<u32>,
    #[prost(message, optional, tag = "12")]
    pub primary_coinbase: Option<ProtoAddress>,
}

/// Ordered list of mining headers (uncles)
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectHeaders {
    #[prost(message, repeated, tag = "1")]
    pub wo_headers: Vec<ProtoWorkObjectHeader>,
}

/// Canonical per-chain header. Repeated fields carry one entry per
/// hierarchy level, prime first.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHeader {
    #[prost(message, repeated, tag = "1")]
    pub parent_hash: Vec<ProtoHash>,
    #[prost(message, optional, tag = "2")]
    pub uncle_hash: Option<ProtoHash>,
    #[prost(message, optional, tag = "3")]
    pub evm_root: Option<ProtoHash>,
    #[prost(message, optional, tag = "4")]
    pub tx_hash: Option<ProtoHash>,
    #[prost(message, optional, tag = "5")]
    pub outbound_etx_hash: Option<ProtoHash>,
    #[prost(message, optional, tag = "6")]
    pub etx_rollup_hash: Option<ProtoHash>,
    #[prost(message, repeated, tag = "7")]
    pub manifest_hash: Vec<ProtoHash>,
    #[prost(message, optional, tag = "8")]
    pub receipt_hash: Option<ProtoHash>,
    #[prost(bytes = "vec", repeated, tag = "9")]
    pub number: Vec<Vec<u8>>,
    #[prost(bytes = "vec", repeated, tag = "10")]
    pub parent_entropy: Vec<Vec<u8>>,
    #[prost(bytes = "vec", repeated, tag = "11")]
    pub parent_delta_entropy: Vec<Vec<u8>>,
    #[prost(uint64, optional, tag = "12")]
    pub gas_limit: Option<u64>,
    #[prost(uint64, optional, tag = "13")]
    pub gas_used: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "14")]
    pub base_fee: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "15")]
    pub extra: Option<Vec<u8>>,
}

/// Opaque transaction envelope
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTransaction {
    #[prost(uint64, optional, tag = "1")]
    pub tx_type: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub payload: Option<Vec<u8>>,
}

/// Ordered list of transactions
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoTransactions {
    #[prost(message, repeated, tag = "1")]
    pub transactions: Vec<ProtoTransaction>,
}

/// Block manifest
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoManifest {
    #[prost(message, repeated, tag = "1")]
    pub manifest: Vec<ProtoHash>,
}

/// Work object body; which fields are present depends on the view
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObjectBody {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ProtoHeader>,
    #[prost(message, optional, tag = "2")]
    pub uncles: Option<ProtoWorkObjectHeaders>,
    #[prost(message, optional, tag = "3")]
    pub transactions: Option<ProtoTransactions>,
    #[prost(message, optional, tag = "4")]
    pub outbound_etxs: Option<ProtoTransactions>,
    #[prost(message, optional, tag = "5")]
    pub manifest: Option<ProtoManifest>,
    #[prost(message, optional, tag = "6")]
    pub interlink_hashes: Option<ProtoHashes>,
}

/// Top-level work object
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoWorkObject {
    #[prost(message, optional, tag = "1")]
    pub wo_header: Option<ProtoWorkObjectHeader>,
    #[prost(message, optional, tag = "2")]
    pub wo_body: Option<ProtoWorkObjectBody>,
    #[prost(message, optional, tag = "3")]
    pub tx: Option<ProtoTransaction>,
}

/// Conversions between domain values and their wire messages
pub(crate) mod convert {
    use super::{ProtoAddress, ProtoHash, ProtoLocation};
    use crate::location::{Location, HIERARCHY_DEPTH};
    use crate::types::{Address, Hash, ADDRESS_LENGTH, HASH_LENGTH};
    use crate::{Error, Result};

    pub fn hash_to_proto(hash: &Hash) -> ProtoHash {
        ProtoHash {
            value: hash.to_vec(),
        }
    }

    pub fn hash_from_proto(field: &'static str, proto: Option<&ProtoHash>) -> Result<Hash> {
        let proto = proto.ok_or_else(|| Error::missing(field))?;
        if proto.value.len() != HASH_LENGTH {
            return Err(Error::invalid_length(field, HASH_LENGTH, proto.value.len()));
        }
        Hash::from_slice(&proto.value)
    }

    pub fn hashes_to_proto(hashes: &[Hash]) -> Vec<ProtoHash> {
        hashes.iter().map(hash_to_proto).collect()
    }

    pub fn hashes_from_proto(field: &'static str, protos: &[ProtoHash]) -> Result<Vec<Hash>> {
        protos
            .iter()
            .map(|proto| hash_from_proto(field, Some(proto)))
            .collect()
    }

    /// Decode exactly one entry per hierarchy level
    pub fn per_level<P, T>(
        field: &'static str,
        protos: &[P],
        decode: impl Fn(&P) -> Result<T>,
    ) -> Result<[T; HIERARCHY_DEPTH]> {
        if protos.len() != HIERARCHY_DEPTH {
            return Err(Error::decode(
                field,
                format!("expected {} entries, got {}", HIERARCHY_DEPTH, protos.len()),
            ));
        }
        let values = protos.iter().map(decode).collect::<Result<Vec<T>>>()?;
        values
            .try_into()
            .map_err(|_| Error::decode(field, "per-level entry count changed"))
    }

    pub fn location_to_proto(location: &Location) -> ProtoLocation {
        ProtoLocation {
            value: location.as_slice().to_vec(),
        }
    }

    pub fn location_from_proto(proto: Option<&ProtoLocation>) -> Result<Location> {
        let proto = proto.ok_or_else(|| Error::missing("location"))?;
        Location::from_slice(&proto.value)
    }

    pub fn address_to_proto(address: &Address) -> ProtoAddress {
        ProtoAddress {
            value: address.as_bytes().to_vec(),
        }
    }

    pub fn address_from_proto(
        field: &'static str,
        proto: Option<&ProtoAddress>,
        location: &Location,
    ) -> Result<Address> {
        let proto = proto.ok_or_else(|| Error::missing(field))?;
        if proto.value.len() != ADDRESS_LENGTH {
            return Err(Error::invalid_length(field, ADDRESS_LENGTH, proto.value.len()));
        }
        Address::from_slice(&proto.value, location)
    }
}
