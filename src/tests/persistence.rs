use crate::ChampMap;

#[test]
fn rollback_after_insert() {
    let mut map = ChampMap::new();
    map.insert(1, 10);
    map.insert(2, 20);

    let cp = map.checkpoint();
    let saved_adhash = map.adhash();
    let saved_arena = map.arena_len();

    map.insert(3, 30);
    map.insert(4, 40);
    assert_eq!(map.len(), 4);

    map.rollback(cp);
    assert_eq!(map.len(), 2);
    assert_eq!(map.adhash(), saved_adhash);
    assert_eq!(map.arena_len(), saved_arena);
    assert_eq!(map.get(&1), Some(&10));
    assert_eq!(map.get(&3), None);
}

#[test]
fn rollback_after_remove() {
    let mut map = ChampMap::new();
    map.insert("a", 1);
    map.insert("b", 2);

    let cp = map.checkpoint();
    map.remove(&"a");
    assert_eq!(map.len(), 1);

    map.rollback(cp);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(map.get(&"b"), Some(&2));
}

#[test]
fn rollback_to_empty() {
    let mut map: ChampMap<i32, i32> = ChampMap::new();
    let cp = map.checkpoint();

    map.insert(1, 1);
    map.insert(2, 2);

    map.rollback(cp);
    assert!(map.is_empty());
    assert_eq!(map.adhash(), 0);
    assert_eq!(map.arena_len(), (0, 0, 0));
}

#[test]
fn rollback_after_clear() {
    let mut map: ChampMap<u32, u32> = (0..64).map(|i| (i, i)).collect();
    let cp = map.checkpoint();
    map.clear();
    map.insert(1000, 1);

    map.rollback(cp);
    assert_eq!(map.len(), 64);
    assert_eq!(map.get(&1000), None);
    assert_eq!(map.get(&63), Some(&63));
}

#[test]
fn nested_checkpoints() {
    let mut map = ChampMap::new();
    map.insert(1, 10);
    let cp1 = map.checkpoint();

    map.insert(2, 20);
    let cp2 = map.checkpoint();

    map.insert(3, 30);
    map.rollback(cp2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&3), None);

    map.rollback(cp1);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&10));
    assert_eq!(map.get(&2), None);
}

/// Mutations never touch nodes reachable from an earlier root.
#[test]
fn old_version_unchanged_by_path_copy() {
    let mut map: ChampMap<u32, u32> = (0..200).map(|i| (i, i)).collect();
    let before: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let cp = map.checkpoint();

    for i in 0..200 {
        map.insert(i, i + 1);
    }
    for i in 0..50 {
        map.remove(&i);
    }

    map.rollback(cp);
    let after: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(before, after);
}

#[test]
fn two_versions_readable_side_by_side() {
    let mut map: ChampMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    let v1 = map.checkpoint();
    let v1_entries: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();

    for i in 0..50 {
        map.remove(&i);
    }
    for i in 100..150 {
        map.insert(i, i * 2);
    }
    map.insert(75, 0);
    let v2 = map.checkpoint();
    map.insert(999, 999);

    let old = map.view(&v1).expect("v1 still in the arena");
    let mid = map.view(&v2).expect("v2 still in the arena");

    assert_eq!(old.len(), 100);
    assert_eq!(old.get(&10), Some(&10));
    assert_eq!(old.get(&75), Some(&75));
    assert_eq!(old.get(&120), None);
    let old_entries: Vec<(u32, u32)> = old.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(old_entries, v1_entries);
    assert_eq!(old.iter().len(), 100);

    assert_eq!(mid.len(), 100);
    assert_eq!(mid.get(&10), None);
    assert_eq!(mid.get(&75), Some(&0));
    assert_eq!(mid.get(&120), Some(&240));
    assert!(!mid.contains_key(&999));

    assert!(map.contains_key(&999));
    assert_eq!(map.len(), 101);
}

#[test]
fn view_matches_map_at_checkpoint_time() {
    let mut map = ChampMap::new();
    for i in 0..300_u64 {
        map.insert(i, i.to_string());
    }
    let cp = map.checkpoint();
    let adhash = map.adhash();
    let depth = map.max_depth();

    map.clear();
    map.insert(1, "one".to_owned());

    let view = map.view(&cp).expect("checkpoint within arena");
    assert_eq!(view.adhash(), adhash);
    assert_eq!(view.max_depth(), depth);
    assert_eq!(view.keys().count(), 300);
    assert_eq!(view.values().filter(|v| v.as_str() == "7").count(), 1);
    assert_eq!(view.get(&1).map(String::as_str), Some("1"));
    assert_eq!(map.get(&1).map(String::as_str), Some("one"));
}

#[test]
fn empty_version_view() {
    let mut map: ChampMap<u8, u8> = ChampMap::new();
    let cp = map.checkpoint();
    map.insert(1, 1);

    let view = map.view(&cp).expect("empty checkpoint always fits");
    assert!(view.is_empty());
    assert!(view.root_node().is_none());
    assert_eq!(view.iter().next(), None);
    assert_eq!(view.get(&1), None);
}

#[test]
fn view_after_rollback_below_checkpoint_is_refused() {
    let mut map: ChampMap<u32, u32> = ChampMap::new();
    let base = map.checkpoint();
    map.insert(1, 1);
    let later = map.checkpoint();

    map.rollback(base);
    assert!(map.view(&later).is_none());
    assert!(map.view(&base).is_some());
}
