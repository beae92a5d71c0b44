use crate::ChampMap;

#[test]
fn empty_map() {
    let map: ChampMap<String, i32> = ChampMap::new();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.adhash(), 0);
    assert!(map.root_node().is_none());
    assert_eq!(map.max_depth(), 0);
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn insert_and_get() {
    let mut map = ChampMap::new();
    assert_eq!(map.insert("key", 100), None);
    assert_eq!(map.len(), 1);
    assert_ne!(map.adhash(), 0);
    assert_eq!(map.get(&"key"), Some(&100));
    assert_eq!(map.get(&"other"), None);
}

#[test]
fn insert_multiple() {
    let mut map = ChampMap::new();
    for i in 0..10 {
        map.insert(i, i * 10);
    }
    assert_eq!(map.len(), 10);
    for i in 0..10 {
        assert_eq!(map.get(&i), Some(&(i * 10)));
    }
}

#[test]
fn overwrite_keeps_len() {
    let mut map = ChampMap::new();
    assert_eq!(map.insert("k", 1), None);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"k"), Some(&2));
}

#[test]
fn contains_key() {
    let mut map = ChampMap::new();
    map.insert(42, "val");
    assert!(map.contains_key(&42));
    assert!(!map.contains_key(&43));
}

#[test]
fn remove_existing() {
    let mut map = ChampMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    assert_eq!(map.remove(&"a"), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"a"), None);
    assert_eq!(map.get(&"b"), Some(&2));
}

#[test]
fn remove_from_empty() {
    let mut map: ChampMap<u8, u8> = ChampMap::new();
    assert_eq!(map.remove(&1), None);
    assert!(map.is_empty());
}

#[test]
fn remove_all() {
    let mut map = ChampMap::new();
    map.insert(1, 10);
    map.insert(2, 20);
    map.insert(3, 30);
    assert_eq!(map.remove(&1), Some(10));
    assert_eq!(map.remove(&2), Some(20));
    assert_eq!(map.remove(&3), Some(30));
    assert!(map.is_empty());
    assert_eq!(map.adhash(), 0);
    assert!(map.root_node().is_none());
}

#[test]
fn clear_resets_contents() {
    let mut map: ChampMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    let arena = map.arena_len();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.adhash(), 0);
    assert_eq!(map.get(&5), None);
    assert_eq!(map.arena_len(), arena);

    map.insert(5, 50);
    assert_eq!(map.get(&5), Some(&50));
    assert_eq!(map.len(), 1);
}

#[test]
fn keys_and_values() {
    let map: ChampMap<u32, u32> = (0..50).map(|i| (i, i + 1000)).collect();

    let mut keys: Vec<u32> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..50).collect::<Vec<_>>());

    let mut values: Vec<u32> = map.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, (1000..1050).collect::<Vec<_>>());

    assert_eq!(map.keys().len(), 50);
}

#[test]
fn custom_hasher() {
    use super::BuildIdentity;

    let mut map = ChampMap::with_hasher(BuildIdentity::default());
    for i in 0_u32..64 {
        map.insert(i, i * 2);
    }
    assert_eq!(map.len(), 64);
    assert_eq!(map.get(&33), Some(&66));
    // 64 identity hashes fill fragments 0..32 at depth 0 and 0..2 at depth 1.
    assert_eq!(map.max_depth(), 1);
}
