//! Persistent CHAMP map, generic over its storage backend.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops;

use safe_bump::Idx;

use crate::ChampCheckpoint;
use crate::adhash;
use crate::arena::{ChampArena, ChampArenaSync};
use crate::hash::{self, DefaultHashBuilder};
use crate::iter::{Iter, Keys, Values};
use crate::node::{self, Entry, Node, NodeRef};
use crate::ops::get::find;
use crate::ops::insert::insert_recursive;
use crate::ops::remove::{RemoveOutcome, remove_recursive};
use crate::ops::single_entry_node;
use crate::store::ChampStore;
use crate::view::ChampView;

/// Persistent hash map based on a CHAMP trie.
///
/// Same set of key-value pairs always produces the same trie structure
/// (canonical form), enabling O(1) structural equality via [`adhash`](Self::adhash).
/// Updates path-copy into the map's arena; untouched subtrees are shared
/// between versions, which [`checkpoint`](Self::checkpoint) and
/// [`rollback`](Self::rollback) expose.
///
/// Use the [`ChampMap`] and [`ChampMapSync`] aliases rather than naming the
/// store parameter directly.
pub struct ChampMapBase<K, V, S, A> {
    store: A,
    root: Option<Idx<Node<K, V>>>,
    size: usize,
    adhash: u64,
    hasher: S,
}

/// Single-threaded CHAMP map over an [`Arena`](safe_bump::Arena) store.
pub type ChampMap<K, V, S = DefaultHashBuilder> = ChampMapBase<K, V, S, ChampArena<K, V>>;

/// CHAMP map over a [`SharedArena`](safe_bump::SharedArena) store.
///
/// `Send + Sync` when `K`, `V` and the hasher are; shared references may be
/// read from several threads while no writer holds `&mut`.
pub type ChampMapSync<K, V, S = DefaultHashBuilder> = ChampMapBase<K, V, S, ChampArenaSync<K, V>>;

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V, A: ChampStore<K, V>> ChampMapBase<K, V, DefaultHashBuilder, A> {
    /// Creates an empty map with the deterministic default hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K, V, S, A: ChampStore<K, V>> ChampMapBase<K, V, S, A> {
    /// Creates an empty map using `hasher` to hash keys.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            store: A::default(),
            root: None,
            size: 0,
            adhash: 0,
            hasher,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the map's hasher builder.
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the current `AdHash` value (the root's subtree hash).
    ///
    /// Two maps with the same `AdHash` and the same length contain the same
    /// entries with overwhelming probability (2⁻⁶⁴ collision chance), provided
    /// they hash keys identically.
    #[must_use]
    pub const fn adhash(&self) -> u64 {
        self.adhash
    }

    /// Saves the current map state for later rollback.
    #[must_use]
    pub fn checkpoint(&self) -> ChampCheckpoint<K, V> {
        ChampCheckpoint {
            store: self.store.checkpoint(),
            root: self.root,
            size: self.size,
            adhash: self.adhash,
        }
    }

    /// Restores the map to a previously saved checkpoint.
    ///
    /// All changes made after the checkpoint are discarded and the arena
    /// space they used is reclaimed.
    pub fn rollback(&mut self, cp: ChampCheckpoint<K, V>) {
        let before = self.store.arena_len();
        self.store.rollback(cp.store);
        self.root = cp.root;
        self.size = cp.size;
        self.adhash = cp.adhash;
        tracing::trace!(
            len = self.size,
            nodes_before = before.0,
            nodes_after = self.store.arena_len().0,
            "champ map rolled back"
        );
    }

    /// Opens the version saved in `cp` for reading alongside the live map.
    ///
    /// Returns `None` if a rollback has since truncated the arenas below
    /// `cp`. Rolling back below a checkpoint and then growing the arenas past
    /// it again leaves the checkpoint stale; reading it is memory safe but
    /// the contents are unspecified.
    #[must_use]
    pub fn view(&self, cp: &ChampCheckpoint<K, V>) -> Option<ChampView<'_, K, V, S, A>> {
        cp.store.within(self.store.arena_len()).then(|| {
            ChampView::new(&self.store, &self.hasher, cp.root, cp.size, cp.adhash)
        })
    }

    /// Returns the total number of allocated items in each arena:
    /// `(nodes, entries, children)`.
    ///
    /// Counts blocks left behind by path copies as well as live ones.
    #[must_use]
    pub fn arena_len(&self) -> (usize, usize, usize) {
        self.store.arena_len()
    }

    /// Removes all entries.
    ///
    /// Arena space is kept; earlier checkpoints remain valid.
    pub const fn clear(&mut self) {
        self.root = None;
        self.size = 0;
        self.adhash = 0;
    }

    /// Returns a [`ChampNode`](crate::node::ChampNode) view of the root, or
    /// `None` for an empty map.
    #[must_use]
    pub fn root_node(&self) -> Option<NodeRef<'_, K, V, A>> {
        self.root.map(|idx| NodeRef::new(&self.store, idx))
    }

    /// Length in edges of the longest root-to-node path.
    ///
    /// Never exceeds [`MAX_DEPTH`](crate::node::MAX_DEPTH): six edges through
    /// bitmap levels plus one into a collision node.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.root_node().map_or(0, |root| node::max_depth(&root))
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter::new(self.root_node(), self.size)
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, A> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, A> {
        Values { inner: self.iter() }
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher, A: ChampStore<K, V>> ChampMapBase<K, V, S, A> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let root = self.root?;
        find(&self.store, root, hash::hash_key(&self.hasher, key), key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<K, V, S, A> ChampMapBase<K, V, S, A>
where
    K: Hash + Eq + Clone,
    V: Hash + Clone,
    S: BuildHasher,
    A: ChampStore<K, V>,
{
    /// Inserts a key-value pair into the map.
    ///
    /// Returns `None` if the key was new, or `Some(old_value)` if an existing
    /// value was replaced.
    ///
    /// # Panics
    ///
    /// Panics if internal arena allocation returns an unexpected `None`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash::hash_key(&self.hasher, &key);
        let entry = Entry { hash, key, value };

        let Some(root) = self.root else {
            let contribution = adhash::contribution(hash, &entry.value);
            let frag = node::fragment(hash, 0);
            self.root = Some(single_entry_node(&mut self.store, entry, frag, contribution));
            self.size = 1;
            self.adhash = contribution;
            return None;
        };

        let outcome = insert_recursive(&mut self.store, root, entry, 0);
        self.root = Some(outcome.node);
        self.adhash = self.adhash.wrapping_add(outcome.adhash_delta);
        if outcome.old_value.is_none() {
            self.size += 1;
        }
        outcome.old_value
    }

    /// Removes a key from the map. Returns the removed value, or `None` if
    /// the key was not present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let root = self.root?;
        let hash = hash::hash_key(&self.hasher, key);
        match remove_recursive(&mut self.store, root, hash, key, 0) {
            RemoveOutcome::NotFound => None,
            RemoveOutcome::Removed {
                node,
                adhash_delta,
                removed_value,
            } => {
                self.root = node;
                self.size -= 1;
                self.adhash = self.adhash.wrapping_sub(adhash_delta);
                Some(removed_value)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Default, A: ChampStore<K, V>> Default for ChampMapBase<K, V, S, A> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, A: ChampStore<K, V>> fmt::Debug for ChampMapBase<K, V, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampMap")
            .field("len", &self.size)
            .field("adhash", &format_args!("{:#018x}", self.adhash))
            .finish_non_exhaustive()
    }
}

impl<K, V, S, A> PartialEq for ChampMapBase<K, V, S, A>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    A: ChampStore<K, V>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S, A> Eq for ChampMapBase<K, V, S, A>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    A: ChampStore<K, V>,
{
}

impl<K, V, S, A> Extend<(K, V)> for ChampMapBase<K, V, S, A>
where
    K: Hash + Eq + Clone,
    V: Hash + Clone,
    S: BuildHasher,
    A: ChampStore<K, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, A> FromIterator<(K, V)> for ChampMapBase<K, V, DefaultHashBuilder, A>
where
    K: Hash + Eq + Clone,
    V: Hash + Clone,
    A: ChampStore<K, V>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: ChampStore<K, V>> ops::Index<&K>
    for ChampMapBase<K, V, S, A>
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, S, A: ChampStore<K, V>> IntoIterator for &'a ChampMapBase<K, V, S, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Iter<'a, K, V, A> {
        self.iter()
    }
}
