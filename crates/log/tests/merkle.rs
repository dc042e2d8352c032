use packlog_log::{validate, validate_range, MerkleLog, Proof};
use prop::test_runner::FileFailurePersistence;
use proptest::{prelude::*, test_runner::Config};

/// Non-empty logs of distinct entries.
fn arb_entries() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 1..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, tail)| {
                let mut entry = (i as u32).to_be_bytes().to_vec();
                entry.extend(tail);
                entry
            })
            .collect()
    })
}

fn arb_log_and_index() -> impl Strategy<Value = (Vec<Vec<u8>>, usize)> {
    arb_entries().prop_flat_map(|entries| {
        let len = entries.len();
        (Just(entries), 0..len)
    })
}

proptest! {
    #![proptest_config(Config::with_failure_persistence(FileFailurePersistence::WithSource("regressions")))]

    #[test]
    fn every_entry_is_provable(entries in arb_entries()) {
        let log: MerkleLog = entries.iter().cloned().collect();
        let root = log.root();
        for (i, entry) in entries.iter().enumerate() {
            let found = log.get(i).unwrap();
            prop_assert_eq!(&found.entry, entry);
            prop_assert!(validate(&root, i, entry, &found.proof));
        }
    }

    #[test]
    fn flipped_proof_bit_fails(
        (entries, i) in arb_log_and_index(),
        sibling in any::<prop::sample::Index>(),
        bit in 0..256usize,
    ) {
        let log: MerkleLog = entries.into_iter().collect();
        let found = log.get(i).unwrap();
        prop_assume!(!found.proof.is_empty());
        let mut proof = found.proof.clone();
        let s = sibling.index(proof.len());
        proof.siblings[s].0[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!validate(&log.root(), i, &found.entry, &proof));
    }

    #[test]
    fn flipped_entry_bit_fails(
        (entries, i) in arb_log_and_index(),
        byte in any::<prop::sample::Index>(),
        bit in 0..8u8,
    ) {
        let log: MerkleLog = entries.into_iter().collect();
        let found = log.get(i).unwrap();
        prop_assume!(!found.entry.is_empty());
        let mut entry = found.entry.clone();
        let b = byte.index(entry.len());
        entry[b] ^= 1 << bit;
        prop_assert!(!validate(&log.root(), i, &entry, &found.proof));
    }

    #[test]
    fn proof_does_not_move(
        (entries, i) in arb_log_and_index(),
        j in any::<prop::sample::Index>(),
    ) {
        let log: MerkleLog = entries.into_iter().collect();
        let j = j.index(log.len());
        prop_assume!(i != j);
        let found = log.get(i).unwrap();
        prop_assert!(!validate(&log.root(), j, &found.entry, &found.proof));
    }

    #[test]
    fn ranges_are_provable(
        entries in arb_entries(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let log: MerkleLog = entries.into_iter().collect();
        let (a, b) = (a.index(log.len()), b.index(log.len()));
        let (start, end) = (a.min(b), a.max(b) + 1);
        let range = log.get_range(start, end).unwrap();
        prop_assert_eq!(range.entries.len(), end - start);
        prop_assert!(validate_range(&log.root(), start, &range.entries, &range.proof));
    }

    #[test]
    fn root_is_deterministic_and_moves(entries in arb_entries(), more in arb_entries()) {
        let a: MerkleLog = entries.iter().cloned().collect();
        let b: MerkleLog = entries.iter().cloned().collect();
        prop_assert_eq!(a.root(), b.root());

        let mut grown = a.clone();
        let len = grown.append(more.iter().cloned());
        prop_assert_eq!(len, entries.len() + more.len());
        prop_assert!(len > a.len());
        prop_assert_ne!(grown.root(), a.root());
    }

    #[test]
    fn old_entries_stay_provable_after_growth(
        (entries, i) in arb_log_and_index(),
        more in arb_entries(),
    ) {
        let mut log: MerkleLog = entries.into_iter().collect();
        log.append(more);
        let found = log.get(i).unwrap();
        prop_assert!(found.verify(&log.root()));
    }

    #[test]
    fn garbage_proofs_never_panic(
        root in any::<[u8; 32]>(),
        index in any::<usize>(),
        entry in prop::collection::vec(any::<u8>(), 0..8),
        siblings in prop::collection::vec(any::<[u8; 32]>(), 0..200),
    ) {
        let proof = Proof::from(siblings.into_iter().map(packlog_types::Digest).collect::<Vec<_>>());
        let _ = validate(&packlog_types::Digest(root), index, &entry, &proof);
    }
}

#[test]
fn five_entry_scenario() {
    let _ = tracing_subscriber::fmt::try_init();
    let mut log = MerkleLog::new();
    for i in 0..5u8 {
        log.append([format!("entry {i}")]);
    }
    let found = log.get(2).unwrap();
    assert_eq!(found.entry, b"entry 2".to_vec());
    assert!(MerkleLog::validate(&log.root(), 2, &found.entry, &found.proof));

    let mut corrupt = found.proof.clone();
    corrupt.siblings[0].0[0] ^= 0xff;
    assert!(!MerkleLog::validate(&log.root(), 2, &found.entry, &corrupt));
}

#[test]
fn proof_serializes() {
    let log: MerkleLog = ["a", "b", "c"].into_iter().collect();
    let found = log.get(0).unwrap();
    let json = serde_json::to_string(&found.proof).unwrap();
    let proof: Proof = serde_json::from_str(&json).unwrap();
    assert!(validate(&log.root(), 0, b"a", &proof));
}
