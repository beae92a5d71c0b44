//! CHAMP trie node types, bitmap helpers and the [`ChampNode`] view.

use std::fmt;

use safe_bump::Idx;

use crate::store::ChampStore;

/// Hash bits consumed per trie level.
pub const BIT_PARTITION_SIZE: u32 = 5;

/// Mask selecting one level's hash fragment.
pub const BIT_PARTITION_MASK: u32 = (1 << BIT_PARTITION_SIZE) - 1;

/// Slots per node (`2^BIT_PARTITION_SIZE`).
pub const BRANCHING_FACTOR: usize = 1 << BIT_PARTITION_SIZE;

/// Width of a spread key hash in bits.
pub const HASH_CODE_LENGTH: u32 = 32;

/// Number of bitmap-indexed levels: `ceil(32 / 5)`.
///
/// Bounds both trie depth and the iterator's stacks.
pub const MAX_DEPTH: usize = 7;

/// Shift of the deepest bitmap-indexed level (uses the top 2 bits).
pub const MAX_SHIFT: u32 = 30;

const _: () = assert!(MAX_DEPTH == HASH_CODE_LENGTH.div_ceil(BIT_PARTITION_SIZE) as usize);
const _: () = assert!(MAX_SHIFT as usize == (MAX_DEPTH - 1) * BIT_PARTITION_SIZE as usize);

/// Inline entry storing a key-value pair with its spread hash.
pub struct Entry<K, V> {
    /// Spread 32-bit hash of the key.
    pub hash: u32,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// CHAMP trie node.
///
/// Two variants maintain the canonical form invariant:
/// - [`Inner`](Self::Inner): bitmap-compressed node at shift `0..=MAX_SHIFT`
/// - [`Collision`](Self::Collision): linear node for full 32-bit hash collisions
pub enum Node<K, V> {
    /// Bitmap-compressed inner node.
    ///
    /// Invariant: `data_map & node_map == 0` (disjoint positions), and at
    /// least one of them is non-zero.
    Inner {
        /// Bitmap of positions occupied by inline entries.
        data_map: u32,
        /// Bitmap of positions occupied by child subtrees.
        node_map: u32,
        /// Index of the first inline entry in the entries arena.
        data_start: Idx<Entry<K, V>>,
        /// Index of the first child pointer in the children arena.
        children_start: Idx<Idx<Self>>,
        /// `AdHash` of this subtree.
        subtree_hash: u64,
    },
    /// Collision node for keys sharing the same 32-bit hash.
    ///
    /// Only appears below the `MAX_SHIFT` level. Invariant: `entries_len >= 2`.
    Collision {
        /// The shared hash value.
        hash: u32,
        /// Index of the first entry in the entries arena.
        entries_start: Idx<Entry<K, V>>,
        /// Number of collision entries.
        entries_len: u32,
        /// `AdHash` of this subtree.
        subtree_hash: u64,
    },
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & BIT_PARTITION_MASK
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

/// Offsets a base index by `n` positions.
#[inline]
#[must_use]
pub const fn offset<T>(base: Idx<T>, n: usize) -> Idx<T> {
    Idx::from_raw(base.into_raw() + n)
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<K, V> Node<K, V> {
    /// Returns the cached `AdHash` of this node's subtree.
    #[must_use]
    pub const fn subtree_hash(&self) -> u64 {
        match self {
            Self::Inner { subtree_hash, .. } | Self::Collision { subtree_hash, .. } => {
                *subtree_hash
            }
        }
    }

    /// Returns the number of inline data entries.
    #[must_use]
    pub const fn data_len(&self) -> usize {
        match self {
            Self::Inner { data_map, .. } => data_map.count_ones() as usize,
            Self::Collision { entries_len, .. } => *entries_len as usize,
        }
    }

    /// Returns the number of child subtrees (always 0 for collision nodes).
    #[must_use]
    pub const fn children_len(&self) -> usize {
        match self {
            Self::Inner { node_map, .. } => node_map.count_ones() as usize,
            Self::Collision { .. } => 0,
        }
    }

    /// Index of the first payload entry.
    #[must_use]
    pub const fn entries_start(&self) -> Idx<Entry<K, V>> {
        match *self {
            Self::Inner { data_start, .. } => data_start,
            Self::Collision { entries_start, .. } => entries_start,
        }
    }
}

// ---------------------------------------------------------------------------
// Node holds only indices and primitives, so these impls need no bounds on K or V.
// ---------------------------------------------------------------------------

impl<K, V> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Node<K, V> {}

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner {
                data_map,
                node_map,
                subtree_hash,
                ..
            } => f
                .debug_struct("Inner")
                .field("data_map", &format_args!("{data_map:#034b}"))
                .field("node_map", &format_args!("{node_map:#034b}"))
                .field("subtree_hash", subtree_hash)
                .finish(),
            Self::Collision {
                hash,
                entries_len,
                subtree_hash,
                ..
            } => f
                .debug_struct("Collision")
                .field("hash", &format_args!("{hash:#010x}"))
                .field("entries_len", entries_len)
                .field("subtree_hash", subtree_hash)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Read-only slot view used by traversal
// ---------------------------------------------------------------------------

/// Read-only view of a compressed trie node: payload slots and child slots.
///
/// Nodes are never mutated once built, so a view may be held and copied
/// freely while its trie is alive.
pub trait ChampNode: Sized {
    /// What a payload slot yields.
    type Payload;

    /// Returns the number of child subtrees.
    fn child_count(&self) -> usize;

    /// Returns the child at position `i` (`i < child_count()`).
    #[must_use]
    fn child_at(&self, i: usize) -> Self;

    /// Returns the number of payload entries stored inline.
    fn payload_count(&self) -> usize;

    /// Returns the spread hash of payload entry `i`.
    fn payload_hash_at(&self, i: usize) -> u32;

    /// Returns payload entry `i` (`i < payload_count()`).
    fn payload_at(&self, i: usize) -> Self::Payload;

    /// Returns the cached aggregate hash of the subtree rooted here.
    fn subtree_hash(&self) -> u64;

    /// Returns `true` if the node has at least one child.
    fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    /// Returns `true` if the node stores at least one payload entry.
    fn has_payload(&self) -> bool {
        self.payload_count() > 0
    }
}

/// Number of edges on the longest root-to-node path below `node`.
pub fn max_depth<N: ChampNode>(node: &N) -> usize {
    (0..node.child_count())
        .map(|i| 1 + max_depth(&node.child_at(i)))
        .max()
        .unwrap_or(0)
}

/// [`ChampNode`] view of an arena-stored [`Node`].
pub struct NodeRef<'a, K: 'a, V: 'a, A> {
    store: &'a A,
    idx: Idx<Node<K, V>>,
}

impl<'a, K, V, A: ChampStore<K, V>> NodeRef<'a, K, V, A> {
    /// Creates a view of the node at `idx` in `store`.
    #[must_use]
    pub const fn new(store: &'a A, idx: Idx<Node<K, V>>) -> Self {
        Self { store, idx }
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn node(&self) -> &'a Node<K, V> {
        let store: &'a A = self.store;
        store.get_node(self.idx)
    }

    fn entry(&self, i: usize) -> &'a Entry<K, V> {
        let node = self.node();
        debug_assert!(i < node.data_len(), "payload slot {i} out of range");
        let store: &'a A = self.store;
        store.entry_at(node.entries_start(), i)
    }
}

impl<'a, K, V, A: ChampStore<K, V>> ChampNode for NodeRef<'a, K, V, A> {
    type Payload = (&'a K, &'a V);

    fn child_count(&self) -> usize {
        self.node().children_len()
    }

    fn child_at(&self, i: usize) -> Self {
        match *self.node() {
            Node::Inner {
                node_map,
                children_start,
                ..
            } => {
                assert!(
                    i < node_map.count_ones() as usize,
                    "child slot {i} out of range"
                );
                Self::new(self.store, self.store.child_idx_at(children_start, i))
            }
            Node::Collision { .. } => panic!("collision nodes have no children"),
        }
    }

    fn payload_count(&self) -> usize {
        self.node().data_len()
    }

    fn payload_hash_at(&self, i: usize) -> u32 {
        self.entry(i).hash
    }

    fn payload_at(&self, i: usize) -> (&'a K, &'a V) {
        let e = self.entry(i);
        (&e.key, &e.value)
    }

    fn subtree_hash(&self) -> u64 {
        self.node().subtree_hash()
    }
}

impl<K, V, A> Clone for NodeRef<'_, K, V, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, A> Copy for NodeRef<'_, K, V, A> {}

impl<K, V, A: ChampStore<K, V>> fmt::Debug for NodeRef<'_, K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node(), f)
    }
}
