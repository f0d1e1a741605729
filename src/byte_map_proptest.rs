#![cfg(test)]

// Property tests for ByteMap kept inside the crate so they can check
// bucket-level invariants directly.

use crate::byte_map::ByteMap;
use crate::error::MapError;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, Vec<u8>),
    Update(usize, Vec<u8>),
    Delete(usize),
    Select(usize),
    Iterate,
    Purge,
}

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    // Short keys with zero bytes mixed in.
    proptest::collection::vec(prop_oneof![Just(0u8), any::<u8>()], 0..6)
}

fn arb_value() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..8)
}

fn arb_scenario(
    pool: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(arb_key(), pool).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), arb_value()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => (idx.clone(), arb_value()).prop_map(|(i, v)| OpI::Update(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Select),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Purge),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_against_model(
    pool: Vec<Vec<u8>>,
    ops: Vec<OpI>,
    tier: usize,
) -> Result<(), TestCaseError> {
    let mut sut = ByteMap::with_tier(tier);
    let mut model: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.insert(k, &v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k.clone(), v);
                    }
                    Err(MapError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                }
            }
            OpI::Update(i, v) => {
                let k = &pool[i];
                prop_assert_eq!(sut.update(k, &v), Ok(()));
                model.insert(k.clone(), v);
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                let expected = if model.remove(k).is_some() {
                    Ok(())
                } else {
                    Err(MapError::NotFound)
                };
                prop_assert_eq!(sut.delete(k), expected);
            }
            OpI::Select(i) => {
                let k = &pool[i];
                match model.get(k) {
                    Some(v) => {
                        prop_assert_eq!(sut.select(k), Ok(&v[..]));
                    }
                    None => {
                        prop_assert_eq!(sut.select(k), Err(MapError::NotFound));
                    }
                }
            }
            OpI::Iterate => {
                let seen: BTreeMap<Vec<u8>, Vec<u8>> =
                    sut.iter().map(|(k, v)| (k.to_vec(), v.to_vec())).collect();
                prop_assert_eq!(seen.len(), sut.len(), "iteration yields each entry once");
                let expected: BTreeMap<Vec<u8>, Vec<u8>> =
                    model.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                prop_assert_eq!(seen, expected);
            }
            OpI::Purge => {
                let tier = sut.tier();
                sut.purge();
                model.clear();
                prop_assert_eq!(sut.tier(), tier);
            }
        }

        // Post-conditions after each op
        // 1) Count parity, and count equals the sum of chain lengths.
        prop_assert_eq!(sut.len(), model.len());
        let chained: usize = sut.chain_lengths().iter().sum();
        prop_assert_eq!(chained, sut.len());
        // 2) Every model key is reachable with its value.
        for (k, v) in &model {
            prop_assert_eq!(sut.get(k), Some(&v[..]));
        }
        // 3) Load factor stays below 1.0 until the last tier.
        prop_assert!(sut.len() < sut.capacity() || sut.tier() == crate::tiers::MAX_TIER);
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected; update upserts.
// - delete of an absent key reports NotFound and changes nothing.
// - `iter` yields each live entry exactly once with its current value.
// - len equals the sum of bucket chain lengths after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(1..=8)) {
        check_against_model(pool, ops, 0)?;
    }
}

// Property: Same invariants with a key pool large enough that random
// sequences cross several growth events from the smallest tier.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_through_growth((pool, ops) in arb_scenario(40..=80)) {
        check_against_model(pool, ops, 0)?;
    }
}
