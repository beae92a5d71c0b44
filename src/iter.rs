//! Depth-first traversal of CHAMP tries.
//!
//! [`ChampIterator`] walks any [`ChampNode`] tree without recursion. It keeps
//! two fixed stacks of `MAX_DEPTH` slots: the nodes whose children are still
//! being visited, and a `(cursor, length)` pair per node. Only nodes that
//! have children are ever pushed, so collision nodes and leaves never occupy
//! a slot. Separately it tracks the *payload node*: the node whose inline
//! entries are currently being emitted.
//!
//! A node's payload is emitted before any of its children.

use std::iter::FusedIterator;

use crate::node::{ChampNode, MAX_DEPTH, NodeRef};
use crate::store::ChampStore;

/// Observable phase of a [`ChampIterator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterState {
    /// The payload node is drained; the stack may still hold unvisited children.
    Searching,
    /// The payload node has unread entries; [`ChampIterator::next_payload`] is valid.
    Emitting,
    /// Every payload entry has been returned.
    Exhausted,
}

/// Explicit-stack iterator over the payload of a [`ChampNode`] tree.
pub struct ChampIterator<N> {
    nodes: [Option<N>; MAX_DEPTH],
    cursors: [(usize, usize); MAX_DEPTH],
    depth: usize,
    payload_node: Option<N>,
    payload_cursor: usize,
    payload_len: usize,
}

impl<N: ChampNode + Clone> ChampIterator<N> {
    /// Creates an iterator rooted at `root`. `None` yields nothing.
    pub fn new(root: Option<N>) -> Self {
        let mut it = Self {
            nodes: std::array::from_fn(|_| None),
            cursors: [(0, 0); MAX_DEPTH],
            depth: 0,
            payload_node: None,
            payload_cursor: 0,
            payload_len: 0,
        };
        if let Some(root) = root {
            if root.has_children() {
                it.push(root.clone());
            }
            if root.has_payload() {
                it.arm(root);
            }
        }
        it
    }

    /// Returns `true` if another payload entry is available.
    ///
    /// May advance the internal stack to find the next payload node, but
    /// never consumes an entry: repeated calls return the same answer.
    pub fn has_next(&mut self) -> bool {
        self.payload_cursor < self.payload_len || self.search_next_payload_node()
    }

    /// Returns the next payload entry.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is exhausted.
    pub fn next_payload(&mut self) -> N::Payload {
        assert!(self.has_next(), "ChampIterator exhausted");
        let node = self
            .payload_node
            .as_ref()
            .expect("armed payload node");
        let payload = node.payload_at(self.payload_cursor);
        self.payload_cursor += 1;
        payload
    }

    /// Returns the current phase without advancing.
    #[must_use]
    pub const fn state(&self) -> IterState {
        if self.payload_cursor < self.payload_len {
            IterState::Emitting
        } else if self.depth == 0 {
            IterState::Exhausted
        } else {
            IterState::Searching
        }
    }

    /// Number of nodes currently on the stack.
    #[must_use]
    pub const fn stack_depth(&self) -> usize {
        self.depth
    }

    fn push(&mut self, node: N) {
        assert!(self.depth < MAX_DEPTH, "trie deeper than {MAX_DEPTH} levels");
        self.cursors[self.depth] = (0, node.child_count());
        self.nodes[self.depth] = Some(node);
        self.depth += 1;
    }

    fn pop(&mut self) {
        self.depth -= 1;
        self.nodes[self.depth] = None;
    }

    fn arm(&mut self, node: N) {
        self.payload_cursor = 0;
        self.payload_len = node.payload_count();
        self.payload_node = Some(node);
    }

    /// Advances the stack until a node with payload is armed.
    fn search_next_payload_node(&mut self) -> bool {
        while self.depth > 0 {
            let top = self.depth - 1;
            let (cursor, len) = self.cursors[top];
            if cursor < len {
                self.cursors[top].0 += 1;
                let child = self.nodes[top]
                    .as_ref()
                    .expect("stacked node")
                    .child_at(cursor);
                if child.has_children() {
                    self.push(child.clone());
                }
                if child.has_payload() {
                    self.arm(child);
                    return true;
                }
            } else {
                self.pop();
            }
        }
        self.payload_node = None;
        false
    }
}

impl<N: ChampNode + Clone> Iterator for ChampIterator<N> {
    type Item = N::Payload;

    fn next(&mut self) -> Option<N::Payload> {
        self.has_next().then(|| self.next_payload())
    }
}

impl<N: ChampNode + Clone> FusedIterator for ChampIterator<N> {}

// ---------------------------------------------------------------------------
// Map-level iterators
// ---------------------------------------------------------------------------

/// Iterator over references to key-value pairs in a [`ChampMap`](crate::ChampMap).
pub struct Iter<'a, K: 'a, V: 'a, A: ChampStore<K, V>> {
    inner: ChampIterator<NodeRef<'a, K, V, A>>,
    remaining: usize,
}

impl<'a, K, V, A: ChampStore<K, V>> Iter<'a, K, V, A> {
    /// Wraps a traversal from `root` over a trie holding `len` entries.
    pub(crate) fn new(root: Option<NodeRef<'a, K, V, A>>, len: usize) -> Self {
        Self {
            inner: ChampIterator::new(root),
            remaining: len,
        }
    }
}

impl<'a, K, V, A: ChampStore<K, V>> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, A: ChampStore<K, V>> ExactSizeIterator for Iter<'_, K, V, A> {}

impl<K, V, A: ChampStore<K, V>> FusedIterator for Iter<'_, K, V, A> {}

/// Iterator over the keys of a [`ChampMap`](crate::ChampMap).
pub struct Keys<'a, K: 'a, V: 'a, A: ChampStore<K, V>> {
    pub(crate) inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A: ChampStore<K, V>> Iterator for Keys<'a, K, V, A> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, A: ChampStore<K, V>> ExactSizeIterator for Keys<'_, K, V, A> {}

/// Iterator over the values of a [`ChampMap`](crate::ChampMap).
pub struct Values<'a, K: 'a, V: 'a, A: ChampStore<K, V>> {
    pub(crate) inner: Iter<'a, K, V, A>,
}

impl<'a, K, V, A: ChampStore<K, V>> Iterator for Values<'a, K, V, A> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, A: ChampStore<K, V>> ExactSizeIterator for Values<'_, K, V, A> {}
