//! Golden hash and encoding vectors for a fixed reference work object

use super::*;
use crate::crypto::{blake2s, EMPTY_UNCLE_HASH};
use crate::types::{Address, Nonce};
use num_bigint::BigUint;
use pretty_assertions::assert_eq;

const EMPTY_HEADER_HASH: &str =
    "0xec32d62787379fa065b48c2127feaf49cb9488f511ab3263bc9ecbd8b27e630d";
const REFERENCE_SEAL_HASH: &str =
    "0xc066edf28b146927c9b9ad80be4fa49d2b23f2c070e14fc712ecd42d998f21f8";
const REFERENCE_HASH: &str =
    "0x3e75edcebe6ed147447356eba1f194873cda96935c03b440ed31ad22c86ee72a";
const REFERENCE_HEADER_BYTES: &str = concat!(
    "0a220a20ec32d62787379fa065b48c2127feaf49cb9488f511ab3263bc9ecbd8b27e630d",
    "12220a20ec32d62787379fa065b48c2127feaf49cb9488f511ab3263bc9ecbd8b27e630d",
    "1a0101",
    "2204075bcd15",
    "2a220a20000456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef3",
    "3001",
    "3a040a020000",
    "42220a20000056789abcdef0123456789abcdef0123456789abcdef0123456789abcdef4",
    "4801",
    "52012a",
    "5800",
    "62160a1423456789abcdef0123456789abcdef0123456789",
);

pub(super) fn reference_location() -> Location {
    Location::zone(0, 0).unwrap()
}

pub(super) fn reference_work_object() -> WorkObject {
    let location = reference_location();
    let empty_header_hash = Header::empty().hash();
    let header = WorkObjectHeader::builder()
        .header_hash(empty_header_hash)
        .parent_hash(empty_header_hash)
        .number(1u64)
        .difficulty(123_456_789u64)
        .prime_terminus_number(42u64)
        .tx_hash(
            Hash::from_hex("0x456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef3")
                .unwrap(),
        )
        .location(location)
        .mix_hash(
            Hash::from_hex("0x56789abcdef0123456789abcdef0123456789abcdef0123456789abcdef4")
                .unwrap(),
        )
        .primary_coinbase(
            Address::from_hex("0x123456789abcdef0123456789abcdef0123456789", &location).unwrap(),
        )
        .time(1)
        .nonce(Nonce::new(1))
        .lock(0)
        .build()
        .unwrap();
    WorkObject::new(header, WorkObjectBody::empty(), None)
}

fn with_uncles(count: usize) -> WorkObject {
    let mut wo = reference_work_object();
    let uncles = (0..count)
        .map(|_| reference_work_object().wo_header().clone())
        .collect();
    wo.body_mut().set_uncles(uncles);
    wo.refresh_uncle_hash();
    wo
}

#[test]
fn test_empty_header_hash() {
    assert_eq!(Header::empty().hash().to_hex(), EMPTY_HEADER_HASH);
}

#[test]
fn test_reference_hashes() {
    let wo = reference_work_object();
    assert_eq!(wo.seal_hash().to_hex(), REFERENCE_SEAL_HASH);
    assert_eq!(wo.hash().to_hex(), REFERENCE_HASH);
}

#[test]
fn test_reference_header_encoding() {
    let wo = reference_work_object();
    assert_eq!(
        hex::encode(prost::Message::encode_to_vec(&wo.wo_header().to_proto())),
        REFERENCE_HEADER_BYTES
    );
}

#[test]
fn test_reference_view_encodings() {
    let wo = reference_work_object();

    let block = wo.encode(WorkObjectView::Block);
    assert_eq!(block.len(), 669);
    assert_eq!(
        blake2s(&block).to_hex(),
        "0x145ec951556172fb041b0d50599d9a93d14fcbe80eb3f9d621a4d83df00622ef"
    );
    assert_eq!(wo.encode(WorkObjectView::WorkShare), block);

    let proof = wo.encode(WorkObjectView::TransactionProof);
    assert_eq!(proof.len(), 659);
    assert_eq!(
        blake2s(&proof).to_hex(),
        "0x68477139cd919469df1789c787428efe7049128160317dbff278425bfa4eba93"
    );
}

#[test]
fn test_decode_reproduces_reference_hash() {
    let wo = reference_work_object();
    let location = reference_location();
    let block = wo.encode(WorkObjectView::Block);

    for view in [
        WorkObjectView::Block,
        WorkObjectView::WorkShare,
        WorkObjectView::TransactionProof,
        WorkObjectView::Header,
    ] {
        let bytes = wo.encode(view);
        let decoded = WorkObject::decode(&bytes, &location, view).unwrap();
        assert_eq!(decoded.hash().to_hex(), REFERENCE_HASH, "view {view}");
    }

    let as_block = WorkObject::decode(&block, &location, WorkObjectView::Block).unwrap();
    let as_share = WorkObject::decode(&block, &location, WorkObjectView::WorkShare).unwrap();
    assert_eq!(as_block, as_share);
    assert_eq!(as_block, wo);
}

#[test]
fn test_uncle_hash_without_uncles() {
    let wo = with_uncles(0);
    assert_eq!(wo.header().uncle_hash(), EMPTY_UNCLE_HASH);
    assert_eq!(wo.hash().to_hex(), REFERENCE_HASH);
}

#[test]
fn test_uncle_hash_with_one_uncle() {
    let wo = with_uncles(1);
    assert_ne!(wo.header().uncle_hash(), EMPTY_UNCLE_HASH);
    assert_ne!(wo.hash().to_hex(), REFERENCE_HASH);
    assert_eq!(
        wo.header().uncle_hash().to_hex(),
        "0xd3fe90ddec68af0afe2e36f528e656d3b9506262a827a083bbd51fab49255a9d"
    );
    assert_eq!(
        wo.hash().to_hex(),
        "0x6f9bafb89399886313b9d372e33ce92ab65121f36c2bd1724913d9334e125df1"
    );
}

#[test]
fn test_uncle_hash_with_five_uncles() {
    let wo = with_uncles(5);
    assert_eq!(
        wo.header().uncle_hash().to_hex(),
        "0x2e6cb08e4352eb98b26e6c3769b86f4321b6ebd2e9bb1cb40e33937b76a575ae"
    );
    assert_eq!(
        wo.wo_header().header_hash().to_hex(),
        "0x49d9aacb3f362b1c2fef45cb7241bb3910c6a87fb2e7adf79068a9d2513c9857"
    );
    assert_eq!(
        wo.hash().to_hex(),
        "0x9e0e8196c36f6d05a5d95e2aa847ac8f3844a28de149dfb765a1ab1a857cf967"
    );

    // Survives the wire
    let bytes = wo.encode(WorkObjectView::Block);
    let decoded = WorkObject::decode(&bytes, &reference_location(), WorkObjectView::Block).unwrap();
    assert_eq!(decoded.body().uncles().len(), 5);
    assert_eq!(decoded.body().calc_uncle_hash(), wo.header().uncle_hash());
    assert_eq!(decoded.hash(), wo.hash());
}

#[test]
fn test_every_location_hashes_differently() {
    let wo = reference_work_object();
    let hashes: std::collections::HashSet<Hash> = crate::config::HierarchyConfig::default()
        .locations()
        .into_iter()
        .map(|location| {
            let mut copy = wo.clone();
            copy.wo_header_mut().set_location(location);
            copy.hash()
        })
        .collect();
    assert_eq!(hashes.len(), 16);
}

#[test]
fn test_clone_is_independent() {
    let original = reference_work_object();
    let mut copy = original.clone();
    assert_eq!(copy.hash().to_hex(), REFERENCE_HASH);

    copy.wo_header_mut().set_location(Location::zone(2, 2).unwrap());
    assert_eq!(
        copy.hash().to_hex(),
        "0x706c1f3a2f57547799c9baa517f497a43f5371e7461264cf070ef614bfe54c64"
    );
    assert_eq!(original.hash().to_hex(), REFERENCE_HASH);
    assert_eq!(original.location(), reference_location());
}

#[test]
fn test_new_reproduces_hash() {
    let original = reference_work_object();
    let rebuilt = WorkObject::new(
        original.wo_header().clone(),
        original.body().clone(),
        original.tx().cloned(),
    );
    assert_eq!(rebuilt.hash(), original.hash());
    assert_eq!(rebuilt, original);
}

#[test]
fn test_reference_integers() {
    let wo = reference_work_object();
    assert_eq!(wo.wo_header().difficulty(), &BigUint::from(123_456_789u32));
    assert_eq!(wo.wo_header().prime_terminus_number(), &BigUint::from(42u32));
    assert!(!wo.wo_header().primary_coinbase().is_internal());
}
