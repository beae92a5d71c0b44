use super::BuildIdentity;
use crate::{ChainedHashMap, TableConfig};

fn identity_map(capacity: usize) -> ChainedHashMap<u32, u32, BuildIdentity> {
    ChainedHashMap::with_config_and_hasher(
        TableConfig::new().with_initial_capacity(capacity),
        BuildIdentity::default(),
    )
}

#[test]
fn empty_map() {
    let map: ChainedHashMap<String, i32> = ChainedHashMap::new();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 16);
    assert!((map.load_factor() - 0.75).abs() < f64::EPSILON);
    assert_eq!(map.get(&"x".to_owned()), None);
}

/// Map-level view of the growth scenario: identity-hashed keys 1..=20.
#[test]
fn identity_growth_through_map() {
    let mut map = identity_map(4);
    for k in 1..=20 {
        map.insert(k, k);
        if k == 3 {
            assert_eq!(map.capacity(), 8);
            assert_eq!(map.table().threshold(), 6);
        }
    }
    assert_eq!(map.capacity(), 32);
    for k in 1..=20_u32 {
        let bucket: Vec<u32> = map.table().chain(k as usize).map(|e| e.key).collect();
        assert_eq!(bucket, [k]);
    }
}

#[test]
fn with_capacity_avoids_growth() {
    let mut map = ChainedHashMap::with_capacity(1_000);
    let capacity = map.capacity();
    for i in 0..1_000 {
        map.insert(i, ());
    }
    assert_eq!(map.capacity(), capacity);
}

#[test]
fn get_key_value_and_get_mut() {
    let mut map = ChainedHashMap::new();
    map.insert("a".to_owned(), 1);
    let key = "a".to_owned();
    assert_eq!(map.get_key_value(&key), Some((&key, &1)));
    *map.get_mut(&key).expect("present") = 5;
    assert_eq!(map[&key], 5);
    assert!(map.get_mut(&"b".to_owned()).is_none());
}

#[test]
fn get_or_insert_with_counts() {
    let mut counts = ChainedHashMap::new();
    for word in "a b a c b a".split(' ') {
        *counts.get_or_insert_with(word, || 0) += 1;
    }
    assert_eq!(counts.get(&"a"), Some(&3));
    assert_eq!(counts.get(&"b"), Some(&2));
    assert_eq!(counts.get(&"c"), Some(&1));
    assert_eq!(counts.len(), 3);
}

#[test]
fn retain_and_values_mut() {
    let mut map: ChainedHashMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    map.retain(|k, _| k % 2 == 0);
    for v in map.values_mut() {
        *v += 1;
    }
    assert_eq!(map.len(), 50);
    assert!(map.keys().all(|k| k % 2 == 0));
    assert!(map.iter().all(|(k, v)| *v == k + 1));
}

#[test]
fn clear_keeps_capacity() {
    let mut map: ChainedHashMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    let capacity = map.capacity();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity);
    map.insert(1, 1);
    assert_eq!(map.len(), 1);
}

/// Clone then mutate either side; the other never sees it.
#[test]
fn clone_independence_both_ways() {
    let mut original = identity_map(4);
    for k in 0..40 {
        original.insert(k, k);
    }
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.insert(1_000, 1);
    copy.remove(&3);
    *copy.get_mut(&4).expect("present") = 44;
    assert_eq!(original.len(), 40);
    assert_eq!(original.get(&3), Some(&3));
    assert_eq!(original.get(&4), Some(&4));
    assert_eq!(original.get(&1_000), None);

    original.insert(2_000, 2);
    original.clear();
    assert_eq!(copy.len(), 40);
    assert_eq!(copy.get(&2_000), None);
    assert_eq!(copy.get(&4), Some(&44));
}

#[test]
fn iteration_visits_every_entry_once() {
    let map: ChainedHashMap<u64, u64> = (0..2_000).map(|i| (i, i * i)).collect();
    assert_eq!(map.iter().len(), 2_000);
    let mut keys: Vec<u64> = map.keys().copied().collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), 2_000);
    assert!(map.values().zip(map.keys()).all(|(v, k)| *v == k * k));
}

#[test]
#[should_panic(expected = "exceeds maximum")]
fn size_hint_past_max_panics() {
    let mut map: ChainedHashMap<u8, u8> = ChainedHashMap::new();
    map.size_hint(usize::MAX / 2);
}

#[test]
fn try_size_hint_reports_error() {
    let mut map: ChainedHashMap<u8, u8> = ChainedHashMap::new();
    let err = map.try_size_hint(usize::MAX / 2).expect_err("too large");
    assert_eq!(err.max, crate::table::MAX_CAPACITY);
    assert_eq!(map.capacity(), 16);
}
