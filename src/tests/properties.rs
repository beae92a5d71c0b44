//! Model-checked properties of both engines against `std::collections::HashMap`.

use std::collections::HashMap;

use proptest::prelude::*;

use super::BuildIdentity;
use crate::node::MAX_DEPTH;
use crate::table::BucketTable;
use crate::{ChainedHashMap, ChampMap, TableConfig};

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u8),
    Remove(u16),
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            8 => (any::<u16>(), any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => any::<u16>().prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ],
        0..400,
    )
}

fn assert_chains_sorted<K, V>(table: &BucketTable<K, V>) -> Result<(), TestCaseError> {
    for i in 0..table.capacity() {
        let hashes: Vec<u32> = table.chain(i).map(|e| e.hash).collect();
        prop_assert!(hashes.is_sorted(), "bucket {} unsorted: {:?}", i, hashes);
        prop_assert!(hashes.iter().all(|&h| table.index(h) == i));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_both_engines_match_model(ops in ops_strategy()) {
        let mut model = HashMap::new();
        let mut chained = ChainedHashMap::new();
        let mut champ = ChampMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let expected = model.insert(k, v);
                    prop_assert_eq!(chained.insert(k, v), expected);
                    prop_assert_eq!(champ.insert(k, v), expected);
                }
                Op::Remove(k) => {
                    let expected = model.remove(&k);
                    prop_assert_eq!(chained.remove(&k), expected);
                    prop_assert_eq!(champ.remove(&k), expected);
                }
                Op::Clear => {
                    model.clear();
                    chained.clear();
                    champ.clear();
                }
            }
        }

        prop_assert_eq!(chained.len(), model.len());
        prop_assert_eq!(champ.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(chained.get(k), Some(v));
            prop_assert_eq!(champ.get(k), Some(v));
        }
        prop_assert_eq!(champ.iter().count(), model.len());
        prop_assert!(champ.max_depth() <= MAX_DEPTH);
        assert_chains_sorted(chained.table())?;
    }

    /// Growth keeps the multiset of records and leaves every chain sorted.
    #[test]
    fn prop_split_preserves_records(
        keys in prop::collection::hash_set(any::<u32>(), 0..300),
        load_factor in 0.25_f64..4.0,
    ) {
        let config = TableConfig::new().with_initial_capacity(4).with_load_factor(load_factor);
        let mut map = ChainedHashMap::with_config_and_hasher(config, BuildIdentity::default());
        for &k in &keys {
            map.insert(k, k);
        }
        prop_assert_eq!(map.len(), keys.len());
        prop_assert!(map.len() < map.table().threshold());
        let mut seen: Vec<u32> = map.keys().copied().collect();
        seen.sort_unstable();
        let mut expected: Vec<u32> = keys.into_iter().collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
        assert_chains_sorted(map.table())?;
    }

    /// The trie shape depends only on its contents.
    #[test]
    fn prop_canonical_under_permutation(
        keys in prop::collection::vec(any::<u32>(), 0..200),
    ) {
        let forward: ChampMap<u32, u32> = keys.iter().map(|&k| (k, k ^ 1)).collect();
        let backward: ChampMap<u32, u32> = keys.iter().rev().map(|&k| (k, k ^ 1)).collect();
        prop_assert_eq!(forward.adhash(), backward.adhash());
        prop_assert_eq!(forward.max_depth(), backward.max_depth());
        let a: Vec<_> = forward.iter().collect();
        let b: Vec<_> = backward.iter().collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_clone_is_independent(
        keys in prop::collection::vec(any::<u16>(), 1..200),
        extra in any::<u16>(),
    ) {
        let original: ChainedHashMap<u16, u16> = keys.iter().map(|&k| (k, k)).collect();
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        copy.remove(&keys[0]);
        copy.insert(extra, extra.wrapping_add(1));
        prop_assert_eq!(original.get(&keys[0]), Some(&keys[0]));
        if !keys.contains(&extra) {
            prop_assert_eq!(original.get(&extra), None);
        }
    }
}
