//! Path-copying insert with `AdHash` maintenance.

use std::hash::Hash;

use safe_bump::Idx;

use super::{
    InnerNode, alloc_or_sentinel, children_inserting, children_replacing, clone_entry,
    entries_inserting, entries_removing, entries_replacing,
};
use crate::adhash;
use crate::node::{self, Entry, Node};
use crate::store::{ChampStore, NodeIdx};

/// Outcome of a recursive insert.
pub struct InsertOutcome<K, V> {
    /// Index of the new (COW-copied) root of the modified subtree.
    pub node: NodeIdx<K, V>,
    /// Wrapping `AdHash` delta to add to the parent's subtree hash.
    pub adhash_delta: u64,
    /// Replaced value when the key was already present.
    pub old_value: Option<V>,
}

/// Inserts `entry` into the subtree rooted at `node_idx` via COW path-copy.
///
/// Recursion depth is bounded by `MAX_DEPTH + 1`.
pub fn insert_recursive<K, V, S>(
    store: &mut S,
    node_idx: NodeIdx<K, V>,
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: Hash + Clone,
    S: ChampStore<K, V>,
{
    match *store.get_node(node_idx) {
        Node::Inner {
            data_map,
            node_map,
            data_start,
            children_start,
            subtree_hash,
        } => {
            let node = InnerNode {
                data_map,
                node_map,
                data_start,
                children_start,
                subtree_hash,
            };
            insert_into_inner(store, node, entry, shift)
        }
        Node::Collision {
            hash,
            entries_start,
            entries_len,
            subtree_hash,
        } => insert_into_collision(store, hash, entries_start, entries_len, subtree_hash, entry),
    }
}

// ---------------------------------------------------------------------------
// Inner node insert
// ---------------------------------------------------------------------------

fn insert_into_inner<K, V, S>(
    store: &mut S,
    node: InnerNode<K, V>,
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: Hash + Clone,
    S: ChampStore<K, V>,
{
    let bit = node::mask(node::fragment(entry.hash, shift));
    let contrib = adhash::contribution(entry.hash, &entry.value);

    if node.node_map & bit != 0 {
        let child_pos = node::index(node.node_map, bit);
        let child = store.child_idx_at(node.children_start, child_pos);
        let outcome = insert_recursive(store, child, entry, shift + node::BIT_PARTITION_SIZE);
        let children = children_replacing(
            store,
            node.children_start,
            node.children_len(),
            child_pos,
            outcome.node,
        );
        let copy = InnerNode {
            children_start: store.alloc_children(children).expect("non-empty"),
            subtree_hash: node.subtree_hash.wrapping_add(outcome.adhash_delta),
            ..node
        };
        return InsertOutcome {
            node: copy.alloc(store),
            ..outcome
        };
    }

    if node.data_map & bit == 0 {
        // Free slot: the entry goes inline.
        let data_map = node.data_map | bit;
        let at = node::index(data_map, bit);
        let entries = entries_inserting(store, node.data_start, node.data_len(), at, entry);
        let copy = InnerNode {
            data_map,
            data_start: store.alloc_entries(entries).expect("non-empty"),
            subtree_hash: node.subtree_hash.wrapping_add(contrib),
            ..node
        };
        return InsertOutcome {
            node: copy.alloc(store),
            adhash_delta: contrib,
            old_value: None,
        };
    }

    let pos = node::index(node.data_map, bit);
    let resident = store.entry_at(node.data_start, pos);
    let resident_contrib = adhash::contribution(resident.hash, &resident.value);

    if resident.hash == entry.hash && resident.key == entry.key {
        let old_value = resident.value.clone();
        let delta = contrib.wrapping_sub(resident_contrib);
        let entries = entries_replacing(store, node.data_start, node.data_len(), pos, entry);
        let copy = InnerNode {
            data_start: store.alloc_entries(entries).expect("non-empty"),
            subtree_hash: node.subtree_hash.wrapping_add(delta),
            ..node
        };
        return InsertOutcome {
            node: copy.alloc(store),
            adhash_delta: delta,
            old_value: Some(old_value),
        };
    }

    // Slot taken by another key: both move into a new subtree one level down.
    let resident = clone_entry(store, node.data_start, pos);
    let subtree = create_subtree(
        store,
        (resident, resident_contrib),
        (entry, contrib),
        shift + node::BIT_PARTITION_SIZE,
    );
    let data_map = node.data_map & !bit;
    let node_map = node.node_map | bit;
    let entries = entries_removing(store, node.data_start, node.data_len(), pos);
    let children = children_inserting(
        store,
        node.children_start,
        node.children_len(),
        node::index(node_map, bit),
        subtree,
    );
    let copy = InnerNode {
        data_map,
        node_map,
        data_start: alloc_or_sentinel(store.alloc_entries(entries)),
        children_start: store.alloc_children(children).expect("non-empty"),
        subtree_hash: node.subtree_hash.wrapping_add(contrib),
    };
    InsertOutcome {
        node: copy.alloc(store),
        adhash_delta: contrib,
        old_value: None,
    }
}

// ---------------------------------------------------------------------------
// Collision node insert
// ---------------------------------------------------------------------------

fn insert_into_collision<K, V, S>(
    store: &mut S,
    node_hash: u32,
    entries_start: Idx<Entry<K, V>>,
    entries_len: u32,
    subtree_hash: u64,
    entry: Entry<K, V>,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: Hash + Clone,
    S: ChampStore<K, V>,
{
    debug_assert_eq!(entry.hash, node_hash, "collision node reached with foreign hash");
    let len = entries_len as usize;
    let contrib = adhash::contribution(entry.hash, &entry.value);

    let existing = (0..len).find(|&i| store.entry_at(entries_start, i).key == entry.key);
    let (old_value, old_contrib) = existing
        .map(|i| {
            let old = store.entry_at(entries_start, i);
            (old.value.clone(), adhash::contribution(old.hash, &old.value))
        })
        .unzip();
    let adhash_delta = contrib.wrapping_sub(old_contrib.unwrap_or(0));
    let replaced = existing.is_some();
    let at = existing.unwrap_or(len);
    let entries = if replaced {
        entries_replacing(store, entries_start, len, at, entry)
    } else {
        entries_inserting(store, entries_start, len, at, entry)
    };
    let entries_len = entries_len + u32::from(!replaced);

    let entries_start = store.alloc_entries(entries).expect("non-empty");
    let node = store.alloc_node(Node::Collision {
        hash: node_hash,
        entries_start,
        entries_len,
        subtree_hash: subtree_hash.wrapping_add(adhash_delta),
    });
    InsertOutcome {
        node,
        adhash_delta,
        old_value,
    }
}

// ---------------------------------------------------------------------------
// Batch subtree creation
// ---------------------------------------------------------------------------

/// Creates a subtree from two entries that collide at the current depth.
///
/// Each entry comes with its `AdHash` contribution. Descends until the hash
/// fragments differ, or creates a collision node once the shift passes
/// `MAX_SHIFT` (the hashes are then fully equal).
fn create_subtree<K, V, S>(
    store: &mut S,
    (e1, c1): (Entry<K, V>, u64),
    (e2, c2): (Entry<K, V>, u64),
    shift: u32,
) -> NodeIdx<K, V>
where
    S: ChampStore<K, V>,
{
    if shift > node::MAX_SHIFT {
        let hash = e1.hash;
        let start = store.alloc_entries([e1, e2]).expect("two entries");
        return store.alloc_node(Node::Collision {
            hash,
            entries_start: start,
            entries_len: 2,
            subtree_hash: c1.wrapping_add(c2),
        });
    }

    let f1 = node::fragment(e1.hash, shift);
    let f2 = node::fragment(e2.hash, shift);
    let subtree_hash = c1.wrapping_add(c2);

    let copy = if f1 == f2 {
        let child = create_subtree(store, (e1, c1), (e2, c2), shift + node::BIT_PARTITION_SIZE);
        InnerNode {
            data_map: 0,
            node_map: node::mask(f1),
            data_start: Idx::from_raw(0),
            children_start: store.alloc_children([child]).expect("one child"),
            subtree_hash,
        }
    } else {
        let pair = if f1 < f2 { [e1, e2] } else { [e2, e1] };
        InnerNode {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            data_start: store.alloc_entries(pair).expect("two entries"),
            children_start: Idx::from_raw(0),
            subtree_hash,
        }
    };
    copy.alloc(store)
}
