//! Property-based tests for work object hashing
//!
//! Every single-field change to the mining header must move its hash.

use super::tests_hashing::{reference_location, reference_work_object};
use super::*;
use crate::types::{Address, Nonce};
use num_bigint::BigUint;
use proptest::prelude::*;

fn reference_header() -> WorkObjectHeader {
    reference_work_object().wo_header().clone()
}

fn assert_mutation_changes_hash(
    mutate: impl FnOnce(&mut WorkObjectHeader),
) -> std::result::Result<(), TestCaseError> {
    let original = reference_header();
    let mut changed = original.clone();
    mutate(&mut changed);
    if changed != original {
        prop_assert_ne!(changed.hash(), original.hash());
    }
    Ok(())
}

proptest! {
    #[test]
    fn header_hash_field_changes_hash(bytes in prop::array::uniform32(any::<u8>())) {
        assert_mutation_changes_hash(|h| h.set_header_hash(Hash::new(bytes)))?;
    }

    #[test]
    fn parent_hash_field_changes_hash(bytes in prop::array::uniform32(any::<u8>())) {
        assert_mutation_changes_hash(|h| h.set_parent_hash(Hash::new(bytes)))?;
    }

    #[test]
    fn tx_hash_field_changes_hash(bytes in prop::array::uniform32(any::<u8>())) {
        assert_mutation_changes_hash(|h| h.set_tx_hash(Hash::new(bytes)))?;
    }

    #[test]
    fn mix_hash_field_changes_hash(bytes in prop::array::uniform32(any::<u8>())) {
        assert_mutation_changes_hash(|h| h.set_mix_hash(Hash::new(bytes)))?;
    }

    #[test]
    fn number_changes_hash(value in prop::collection::vec(any::<u8>(), 0..=32)) {
        assert_mutation_changes_hash(|h| h.set_number(BigUint::from_bytes_be(&value)).unwrap())?;
    }

    #[test]
    fn difficulty_changes_hash(value in any::<u128>()) {
        assert_mutation_changes_hash(|h| h.set_difficulty(BigUint::from(value)).unwrap())?;
    }

    #[test]
    fn prime_terminus_changes_hash(value in any::<u64>()) {
        assert_mutation_changes_hash(|h| h.set_prime_terminus_number(BigUint::from(value)).unwrap())?;
    }

    #[test]
    fn time_changes_hash(value in any::<u64>()) {
        assert_mutation_changes_hash(|h| h.set_time(value))?;
    }

    #[test]
    fn nonce_changes_hash(value in any::<u64>()) {
        assert_mutation_changes_hash(|h| h.set_nonce(Nonce::new(value)))?;
    }

    #[test]
    fn lock_changes_hash(value in any::<u8>()) {
        assert_mutation_changes_hash(|h| h.set_lock(value))?;
    }

    #[test]
    fn coinbase_changes_hash(bytes in prop::array::uniform20(any::<u8>())) {
        assert_mutation_changes_hash(|h| h.set_primary_coinbase(Address::new(bytes, &reference_location())))?;
    }

    #[test]
    fn location_changes_hash(region in 0u8..16, zone in 0u8..16) {
        let location = Location::zone(region, zone).unwrap();
        assert_mutation_changes_hash(|h| h.set_location(location))?;
    }

    #[test]
    fn seal_hash_stable_across_solutions(
        nonce in any::<u64>(),
        mix in prop::array::uniform32(any::<u8>())
    ) {
        let original = reference_header();
        let mut solved = original.clone();
        solved.set_nonce(Nonce::new(nonce));
        solved.set_mix_hash(Hash::new(mix));

        prop_assert_eq!(solved.seal_hash(), original.seal_hash());
        prop_assert_ne!(solved.hash(), solved.seal_hash());
        prop_assert_eq!(
            solved.hash(),
            pow_hash(&original.seal_hash(), Nonce::new(nonce), &Hash::new(mix))
        );
    }

    #[test]
    fn nonce_byte_roundtrip(value in any::<u64>()) {
        let nonce = Nonce::new(value);
        prop_assert_eq!(Nonce::from_be_bytes(nonce.to_be_bytes()), nonce);
    }

    #[test]
    fn header_wire_preserves_hash(
        number in any::<u64>(),
        time in any::<u64>(),
        nonce in any::<u64>(),
        lock in any::<u8>()
    ) {
        let mut header = reference_header();
        header.set_number(BigUint::from(number)).unwrap();
        header.set_time(time);
        header.set_nonce(Nonce::new(nonce));
        header.set_lock(lock);

        let wo = WorkObject::new(header, WorkObjectBody::empty(), None);
        let bytes = wo.encode(WorkObjectView::WorkShare);
        let decoded = WorkObject::decode(&bytes, &reference_location(), WorkObjectView::WorkShare).unwrap();
        prop_assert_eq!(decoded.hash(), wo.hash());
    }
}
