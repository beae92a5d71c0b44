use crate::adhash::{contribution, entry_adhash, hash_one};
use crate::hash::{DefaultHashBuilder, hash_key};
use crate::{ChampMap, ChampSet};

fn key_hash<T: std::hash::Hash>(key: &T) -> u32 {
    hash_key(&DefaultHashBuilder::default(), key)
}

/// φ(∅) = 0.
#[test]
fn empty_adhash_is_zero() {
    let map: ChampMap<String, String> = ChampMap::new();
    assert_eq!(map.adhash(), 0);
}

/// φ(S ∪ {e}) = φ(S) + f(e).
#[test]
fn incremental_insert() {
    let mut map = ChampMap::new();
    let h0 = map.adhash();

    map.insert("a", 1);
    let h1 = map.adhash();
    assert_eq!(h1, h0.wrapping_add(contribution(key_hash(&"a"), &1)));

    map.insert("b", 2);
    let h2 = map.adhash();
    assert_eq!(h2, h1.wrapping_add(entry_adhash(key_hash(&"b"), hash_one(&2))));
}

/// Insert + remove roundtrip: φ returns to 0.
#[test]
fn roundtrip_to_zero() {
    let mut map = ChampMap::new();
    map.insert(1, 100);
    map.insert(2, 200);
    map.insert(3, 300);
    map.remove(&1);
    map.remove(&2);
    map.remove(&3);
    assert_eq!(map.adhash(), 0);
}

/// Commutativity: φ({a,b}) = φ({b,a}).
#[test]
fn commutativity() {
    let mut m1 = ChampMap::new();
    m1.insert("x", 10);
    m1.insert("y", 20);

    let mut m2 = ChampMap::new();
    m2.insert("y", 20);
    m2.insert("x", 10);

    assert_eq!(m1.adhash(), m2.adhash());
}

/// Even when `hash(value) = 0`, a non-zero key hash still contributes.
#[test]
fn two_seed_no_degeneration() {
    assert_ne!(entry_adhash(key_hash(&42_u64), 0), 0);
}

#[test]
fn overwrite_changes_adhash() {
    let mut map = ChampMap::new();
    map.insert("key", 1);
    let h1 = map.adhash();
    map.insert("key", 2);
    assert_ne!(h1, map.adhash());
    map.insert("key", 1);
    assert_eq!(h1, map.adhash());
}

/// The cached root subtree hash is the map's fingerprint.
#[test]
fn root_subtree_hash_matches_map() {
    use crate::node::ChampNode;

    let map: ChampMap<u32, u32> = (0..500).map(|i| (i, i ^ 0x55)).collect();
    let root = map.root_node().expect("non-empty");
    assert_eq!(root.subtree_hash(), map.adhash());

    let summed = map
        .iter()
        .fold(0_u64, |acc, (k, v)| acc.wrapping_add(contribution(key_hash(k), v)));
    assert_eq!(summed, map.adhash());
}

#[test]
fn sets_with_equal_elements_share_adhash() {
    let a: ChampSet<&str> = ["x", "y", "z"].into_iter().collect();
    let b: ChampSet<&str> = ["z", "x", "y"].into_iter().collect();
    assert_eq!(a.adhash(), b.adhash());
    assert_eq!(a, b);
}
