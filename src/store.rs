//! The arena interface the trie operations are written against.
//!
//! A store owns three append-only arenas: nodes, inline entry blocks and
//! child pointer blocks. A node refers to its blocks by the index of their
//! first slot, so a block is read by offsetting from that start.

use safe_bump::{Checkpoint, Idx};

use crate::node::{self, Entry, Node};

/// Index of a node in a store.
pub type NodeIdx<K, V> = Idx<Node<K, V>>;

/// Index of a slot in a child pointer block.
pub type ChildIdx<K, V> = Idx<NodeIdx<K, V>>;

/// Arena lengths captured by [`ChampStore::checkpoint`].
///
/// Holds no keys or values, so it is `Copy` for any `K` and `V`.
pub struct StoreCheckpoint<K, V> {
    /// Length of the node arena.
    pub nodes: Checkpoint<Node<K, V>>,
    /// Length of the entry arena.
    pub entries: Checkpoint<Entry<K, V>>,
    /// Length of the child pointer arena.
    pub children: Checkpoint<NodeIdx<K, V>>,
}

impl<K, V> Clone for StoreCheckpoint<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for StoreCheckpoint<K, V> {}

impl<K, V> StoreCheckpoint<K, V> {
    /// Returns `true` if arenas of the given `(nodes, entries, children)`
    /// lengths still hold every slot this checkpoint covers.
    #[must_use]
    pub const fn within(&self, arena_len: (usize, usize, usize)) -> bool {
        self.nodes.len() <= arena_len.0
            && self.entries.len() <= arena_len.1
            && self.children.len() <= arena_len.2
    }
}

/// Append-only storage for CHAMP nodes.
///
/// Implemented by [`ChampArena`](crate::ChampArena) and
/// [`ChampArenaSync`](crate::ChampArenaSync). Blocks are never written
/// after allocation; every root handed out earlier stays readable until the
/// store is rolled back below it.
pub trait ChampStore<K, V>: Default {
    /// Appends one node.
    fn alloc_node(&mut self, node: Node<K, V>) -> NodeIdx<K, V>;

    /// Reads the node at `idx`.
    fn get_node(&self, idx: NodeIdx<K, V>) -> &Node<K, V>;

    /// Appends a contiguous entry block and returns its start, or `None`
    /// when `iter` is empty.
    fn alloc_entries(
        &mut self,
        iter: impl IntoIterator<Item = Entry<K, V>>,
    ) -> Option<Idx<Entry<K, V>>>;

    /// Reads one entry slot.
    fn get_entry(&self, idx: Idx<Entry<K, V>>) -> &Entry<K, V>;

    /// Appends a contiguous child pointer block and returns its start, or
    /// `None` when `iter` is empty.
    fn alloc_children(
        &mut self,
        iter: impl IntoIterator<Item = NodeIdx<K, V>>,
    ) -> Option<ChildIdx<K, V>>;

    /// Reads one child pointer slot.
    fn get_child(&self, idx: ChildIdx<K, V>) -> &NodeIdx<K, V>;

    /// Captures the current length of all three arenas.
    fn checkpoint(&self) -> StoreCheckpoint<K, V>;

    /// Truncates all three arenas back to `cp`.
    fn rollback(&mut self, cp: StoreCheckpoint<K, V>);

    /// Slots allocated per arena as `(nodes, entries, children)`, counting
    /// blocks no live root reaches any more.
    fn arena_len(&self) -> (usize, usize, usize);

    /// Reads the `i`-th entry of the block starting at `start`.
    fn entry_at(&self, start: Idx<Entry<K, V>>, i: usize) -> &Entry<K, V> {
        self.get_entry(node::offset(start, i))
    }

    /// Reads the `i`-th child of the block starting at `start`.
    fn child_idx_at(&self, start: ChildIdx<K, V>, i: usize) -> NodeIdx<K, V> {
        *self.get_child(node::offset(start, i))
    }
}
