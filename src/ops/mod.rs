//! Trie operations and the block builders they share.
//!
//! Every builder reads an existing arena block and returns a fresh `Vec`
//! for a new allocation; existing blocks are never written.

use safe_bump::Idx;

use crate::node::{self, Entry, Node};
use crate::store::{ChampStore, ChildIdx, NodeIdx};

pub mod get;
pub mod insert;
pub mod remove;

/// Clones the `i`-th entry of the block at `start` for a new allocation.
pub fn clone_entry<K: Clone, V: Clone, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Entry<K, V>>,
    i: usize,
) -> Entry<K, V> {
    let e = store.entry_at(start, i);
    Entry {
        hash: e.hash,
        key: e.key.clone(),
        value: e.value.clone(),
    }
}

pub fn entries_inserting<K: Clone, V: Clone, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Entry<K, V>>,
    len: usize,
    at: usize,
    entry: Entry<K, V>,
) -> Vec<Entry<K, V>> {
    let mut out = Vec::with_capacity(len + 1);
    for i in 0..at {
        out.push(clone_entry(store, start, i));
    }
    out.push(entry);
    for i in at..len {
        out.push(clone_entry(store, start, i));
    }
    out
}

pub fn entries_replacing<K: Clone, V: Clone, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Entry<K, V>>,
    len: usize,
    at: usize,
    entry: Entry<K, V>,
) -> Vec<Entry<K, V>> {
    let mut out = Vec::with_capacity(len);
    for i in 0..at {
        out.push(clone_entry(store, start, i));
    }
    out.push(entry);
    for i in (at + 1)..len {
        out.push(clone_entry(store, start, i));
    }
    out
}

pub fn entries_removing<K: Clone, V: Clone, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Entry<K, V>>,
    len: usize,
    at: usize,
) -> Vec<Entry<K, V>> {
    (0..len)
        .filter(|&i| i != at)
        .map(|i| clone_entry(store, start, i))
        .collect()
}

pub fn children_inserting<K, V, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Idx<Node<K, V>>>,
    len: usize,
    at: usize,
    child: Idx<Node<K, V>>,
) -> Vec<Idx<Node<K, V>>> {
    let mut out = Vec::with_capacity(len + 1);
    for i in 0..at {
        out.push(store.child_idx_at(start, i));
    }
    out.push(child);
    for i in at..len {
        out.push(store.child_idx_at(start, i));
    }
    out
}

pub fn children_replacing<K, V, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Idx<Node<K, V>>>,
    len: usize,
    at: usize,
    child: Idx<Node<K, V>>,
) -> Vec<Idx<Node<K, V>>> {
    (0..len)
        .map(|i| {
            if i == at {
                child
            } else {
                store.child_idx_at(start, i)
            }
        })
        .collect()
}

pub fn children_removing<K, V, S: ChampStore<K, V>>(
    store: &S,
    start: Idx<Idx<Node<K, V>>>,
    len: usize,
    at: usize,
) -> Vec<Idx<Node<K, V>>> {
    (0..len)
        .filter(|&i| i != at)
        .map(|i| store.child_idx_at(start, i))
        .collect()
}

/// Returns the index from an `Option`, using a sentinel for `None`.
///
/// Used when a bitmap is zero (no entries/children) and the start index
/// is never read while the bitmap is zero.
#[allow(clippy::option_if_let_else)]
pub const fn alloc_or_sentinel<T>(idx: Option<Idx<T>>) -> Idx<T> {
    match idx {
        Some(i) => i,
        None => Idx::from_raw(0),
    }
}

/// Allocates a one-entry inner node whose entry sits at `frag`.
pub fn single_entry_node<K, V, S: ChampStore<K, V>>(
    store: &mut S,
    entry: Entry<K, V>,
    frag: u32,
    subtree_hash: u64,
) -> NodeIdx<K, V> {
    let data_start = store
        .alloc_entries(std::iter::once(entry))
        .expect("single entry");
    InnerNode {
        data_map: node::mask(frag),
        node_map: 0,
        data_start,
        children_start: Idx::from_raw(0),
        subtree_hash,
    }
    .alloc(store)
}

/// Fields of an inner node, copied out so a path copy can rebuild it with
/// struct update syntax.
pub struct InnerNode<K, V> {
    pub data_map: u32,
    pub node_map: u32,
    pub data_start: Idx<Entry<K, V>>,
    pub children_start: ChildIdx<K, V>,
    pub subtree_hash: u64,
}

impl<K, V> Clone for InnerNode<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for InnerNode<K, V> {}

impl<K, V> InnerNode<K, V> {
    pub const fn data_len(&self) -> usize {
        self.data_map.count_ones() as usize
    }

    pub const fn children_len(&self) -> usize {
        self.node_map.count_ones() as usize
    }

    pub fn alloc<S: ChampStore<K, V>>(self, store: &mut S) -> NodeIdx<K, V> {
        store.alloc_node(Node::Inner {
            data_map: self.data_map,
            node_map: self.node_map,
            data_start: self.data_start,
            children_start: self.children_start,
            subtree_hash: self.subtree_hash,
        })
    }
}
