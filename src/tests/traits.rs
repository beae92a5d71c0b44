use crate::{ChainedHashMap, ChampMap};

#[test]
fn default_is_empty() {
    let champ: ChampMap<i32, i32> = ChampMap::default();
    assert!(champ.is_empty());
    assert_eq!(champ.adhash(), 0);

    let chained: ChainedHashMap<i32, i32> = ChainedHashMap::default();
    assert!(chained.is_empty());
    assert_eq!(chained.capacity(), 16);
}

#[test]
fn debug_format() {
    let map: ChampMap<i32, i32> = ChampMap::new();
    let dbg = format!("{map:?}");
    assert!(dbg.contains("ChampMap"));
    assert!(dbg.contains("len"));

    let mut chained = ChainedHashMap::new();
    chained.insert(1, "one");
    assert_eq!(format!("{chained:?}"), r#"{1: "one"}"#);
}

#[test]
fn from_iterator() {
    let champ: ChampMap<i32, i32> = vec![(1, 10), (2, 20), (3, 30)].into_iter().collect();
    assert_eq!(champ.len(), 3);
    assert_eq!(champ.get(&1), Some(&10));

    let chained: ChainedHashMap<i32, i32> = (0..100).map(|i| (i, -i)).collect();
    assert_eq!(chained.len(), 100);
    assert_eq!(chained.get(&99), Some(&-99));
}

/// `extend` sizes the table once from the iterator's lower bound.
#[test]
fn extend_presizes_chained() {
    let mut map = ChainedHashMap::new();
    map.insert(-1, 0);
    map.extend((0..1_000).map(|i| (i, i)));
    assert_eq!(map.len(), 1_001);
    assert!(map.capacity() >= 1_024);
    assert!(map.len() < map.table().threshold());
}

#[test]
fn extend_champ() {
    let mut map = ChampMap::new();
    map.insert(1, 10);
    map.extend(vec![(2, 20), (3, 30)]);
    assert_eq!(map.len(), 3);
}

#[test]
fn index_existing() {
    let mut map = ChampMap::new();
    map.insert("key", 42);
    assert_eq!(map[&"key"], 42);

    let mut chained = ChainedHashMap::new();
    chained.insert("key", 7);
    assert_eq!(chained[&"key"], 7);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: ChampMap<i32, i32> = ChampMap::new();
    let _ = map[&999];
}

#[test]
#[should_panic(expected = "key not found")]
fn chained_index_missing_panics() {
    let map: ChainedHashMap<i32, i32> = ChainedHashMap::new();
    let _ = map[&999];
}

#[test]
fn equality_ignores_insertion_order() {
    let a: ChainedHashMap<u32, u32> = (0..64).map(|i| (i, i)).collect();
    let b: ChainedHashMap<u32, u32> = (0..64).rev().map(|i| (i, i)).collect();
    assert_eq!(a, b);

    let mut c = b.clone();
    c.insert(0, 1);
    assert_ne!(a, c);
}

#[test]
fn owned_and_mutable_iteration() {
    let mut map: ChainedHashMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    for (_, v) in &mut map {
        *v *= 10;
    }
    let mut pairs: Vec<(u32, u32)> = map.into_iter().collect();
    pairs.sort_unstable();
    assert_eq!(pairs, (0..10).map(|i| (i, i * 10)).collect::<Vec<_>>());
}
