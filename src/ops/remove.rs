//! Path-copying delete with canonical inlining.

use std::hash::Hash;

use safe_bump::Idx;

use super::{
    InnerNode, alloc_or_sentinel, children_removing, children_replacing, clone_entry,
    entries_inserting, entries_removing, single_entry_node,
};
use crate::adhash;
use crate::node::{self, Entry, Node};
use crate::store::{ChampStore, NodeIdx};

/// Outcome of a recursive remove.
pub enum RemoveOutcome<K, V> {
    /// Key was not found; the tree is unchanged.
    NotFound,
    /// Key was removed.
    Removed {
        /// New root of the modified subtree, or `None` if the subtree is now empty.
        node: Option<NodeIdx<K, V>>,
        /// Wrapping `AdHash` delta to subtract from the parent's subtree hash.
        adhash_delta: u64,
        /// Value the removed entry held.
        removed_value: V,
    },
}

/// Removes `key` from the subtree rooted at `node_idx` via COW path-copy.
pub fn remove_recursive<K, V, S>(
    store: &mut S,
    node_idx: NodeIdx<K, V>,
    hash: u32,
    key: &K,
    shift: u32,
) -> RemoveOutcome<K, V>
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
            remove_from_inner(store, node, hash, key, shift)
        }
        Node::Collision {
            hash: node_hash,
            entries_start,
            entries_len,
            subtree_hash,
        } if node_hash == hash => {
            remove_from_collision(store, node_hash, entries_start, entries_len, subtree_hash, key)
        }
        Node::Collision { .. } => RemoveOutcome::NotFound,
    }
}

// ---------------------------------------------------------------------------
// Inner node remove
// ---------------------------------------------------------------------------

fn remove_from_inner<K, V, S>(
    store: &mut S,
    node: InnerNode<K, V>,
    hash: u32,
    key: &K,
    shift: u32,
) -> RemoveOutcome<K, V>
where
    K: Eq + Clone,
    V: Hash + Clone,
    S: ChampStore<K, V>,
{
    let bit = node::mask(node::fragment(hash, shift));

    if node.data_map & bit != 0 {
        let pos = node::index(node.data_map, bit);
        let e = store.entry_at(node.data_start, pos);
        if e.hash != hash || e.key != *key {
            return RemoveOutcome::NotFound;
        }
        let adhash_delta = adhash::contribution(e.hash, &e.value);
        let removed_value = e.value.clone();

        let data_map = node.data_map & !bit;
        let rebuilt = (data_map != 0 || node.node_map != 0).then(|| {
            let entries = entries_removing(store, node.data_start, node.data_len(), pos);
            InnerNode {
                data_map,
                data_start: alloc_or_sentinel(store.alloc_entries(entries)),
                subtree_hash: node.subtree_hash.wrapping_sub(adhash_delta),
                ..node
            }
            .alloc(store)
        });
        return RemoveOutcome::Removed {
            node: rebuilt,
            adhash_delta,
            removed_value,
        };
    }

    if node.node_map & bit == 0 {
        return RemoveOutcome::NotFound;
    }

    let child_pos = node::index(node.node_map, bit);
    let child = store.child_idx_at(node.children_start, child_pos);
    let RemoveOutcome::Removed {
        node: new_child,
        adhash_delta,
        removed_value,
    } = remove_recursive(store, child, hash, key, shift + node::BIT_PARTITION_SIZE)
    else {
        return RemoveOutcome::NotFound;
    };

    let subtree_hash = node.subtree_hash.wrapping_sub(adhash_delta);
    let rebuilt = match new_child {
        Some(child) if is_single_entry(store.get_node(child)) => {
            Some(inline_child(store, node, bit, child_pos, child, subtree_hash))
        }
        Some(child) => {
            let children =
                children_replacing(store, node.children_start, node.children_len(), child_pos, child);
            let copy = InnerNode {
                children_start: store.alloc_children(children).expect("non-empty"),
                subtree_hash,
                ..node
            };
            Some(copy.alloc(store))
        }
        None if node.data_map == 0 && node.node_map == bit => None,
        None => {
            // The child emptied out; drop its slot.
            let children =
                children_removing(store, node.children_start, node.children_len(), child_pos);
            let copy = InnerNode {
                node_map: node.node_map & !bit,
                children_start: alloc_or_sentinel(store.alloc_children(children)),
                subtree_hash,
                ..node
            };
            Some(copy.alloc(store))
        }
    };
    RemoveOutcome::Removed {
        node: rebuilt,
        adhash_delta,
        removed_value,
    }
}

/// A child holding exactly one entry and no children is folded back into
/// its parent.
const fn is_single_entry<K, V>(node: &Node<K, V>) -> bool {
    match node {
        Node::Inner {
            data_map, node_map, ..
        } => data_map.is_power_of_two() && *node_map == 0,
        Node::Collision { .. } => false,
    }
}

/// Moves the only entry of `child` into `parent`'s payload at `bit`.
fn inline_child<K, V, S>(
    store: &mut S,
    parent: InnerNode<K, V>,
    bit: u32,
    child_pos: usize,
    child: NodeIdx<K, V>,
    subtree_hash: u64,
) -> NodeIdx<K, V>
where
    K: Clone,
    V: Clone,
    S: ChampStore<K, V>,
{
    let inlined = clone_entry(store, store.get_node(child).entries_start(), 0);
    let data_map = parent.data_map | bit;
    let at = node::index(data_map, bit);
    let entries = entries_inserting(store, parent.data_start, parent.data_len(), at, inlined);
    let children = children_removing(store, parent.children_start, parent.children_len(), child_pos);

    InnerNode {
        data_map,
        node_map: parent.node_map & !bit,
        data_start: store.alloc_entries(entries).expect("non-empty after inline"),
        children_start: alloc_or_sentinel(store.alloc_children(children)),
        subtree_hash,
    }
    .alloc(store)
}

// ---------------------------------------------------------------------------
// Collision node remove
// ---------------------------------------------------------------------------

fn remove_from_collision<K, V, S>(
    store: &mut S,
    node_hash: u32,
    entries_start: Idx<Entry<K, V>>,
    entries_len: u32,
    subtree_hash: u64,
    key: &K,
) -> RemoveOutcome<K, V>
where
    K: Eq + Clone,
    V: Hash + Clone,
    S: ChampStore<K, V>,
{
    let len = entries_len as usize;
    let Some(pos) = (0..len).find(|&i| store.entry_at(entries_start, i).key == *key)
    else {
        return RemoveOutcome::NotFound;
    };

    let (adhash_delta, removed_value) = {
        let e = store.entry_at(entries_start, pos);
        (adhash::contribution(e.hash, &e.value), e.value.clone())
    };

    let new_node = if len == 2 {
        // One entry left → hand it up as a single-entry node for the parent
        // to inline.
        let remaining = clone_entry(store, entries_start, 1 - pos);
        let frag = node::fragment(remaining.hash, 0);
        single_entry_node(store, remaining, frag, subtree_hash.wrapping_sub(adhash_delta))
    } else {
        let entries = entries_removing(store, entries_start, len, pos);
        let new_start = store.alloc_entries(entries).expect("at least 2 remaining");
        store.alloc_node(Node::Collision {
            hash: node_hash,
            entries_start: new_start,
            entries_len: entries_len - 1,
            subtree_hash: subtree_hash.wrapping_sub(adhash_delta),
        })
    };
    RemoveOutcome::Removed {
        node: Some(new_node),
        adhash_delta,
        removed_value,
    }
}
