//! Read-only access to an earlier version of a CHAMP map.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::hash;
use crate::iter::{Iter, Keys, Values};
use crate::node::{self, NodeRef};
use crate::ops::get::find;
use crate::store::{ChampStore, NodeIdx};

/// A version of a [`ChampMapBase`](crate::ChampMapBase) saved by
/// [`checkpoint`](crate::ChampMapBase::checkpoint), readable next to the
/// live map.
///
/// Path copies never write to existing nodes, so the root captured by a
/// checkpoint keeps describing exactly the entries it held, while the map
/// moves on. Created by [`ChampMapBase::view`](crate::ChampMapBase::view).
pub struct ChampView<'a, K: 'a, V: 'a, S, A> {
    store: &'a A,
    hasher: &'a S,
    root: Option<NodeIdx<K, V>>,
    size: usize,
    adhash: u64,
}

impl<'a, K, V, S, A: ChampStore<K, V>> ChampView<'a, K, V, S, A> {
    pub(crate) const fn new(
        store: &'a A,
        hasher: &'a S,
        root: Option<NodeIdx<K, V>>,
        size: usize,
        adhash: u64,
    ) -> Self {
        Self {
            store,
            hasher,
            root,
            size,
            adhash,
        }
    }

    /// Number of entries in this version.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if this version holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `AdHash` of this version.
    #[must_use]
    pub const fn adhash(&self) -> u64 {
        self.adhash
    }

    /// Root of this version's trie, or `None` if it is empty.
    #[must_use]
    pub fn root_node(&self) -> Option<NodeRef<'a, K, V, A>> {
        self.root.map(|idx| NodeRef::new(self.store, idx))
    }

    /// Length in edges of the longest root-to-node path.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.root_node().map_or(0, |root| node::max_depth(&root))
    }

    /// Iterates this version's `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'a, K, V, A> {
        Iter::new(self.root_node(), self.size)
    }

    /// Iterates this version's keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'a, K, V, A> {
        Keys { inner: self.iter() }
    }

    /// Iterates this version's values.
    #[must_use]
    pub fn values(&self) -> Values<'a, K, V, A> {
        Values { inner: self.iter() }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher, A: ChampStore<K, V>> ChampView<'a, K, V, S, A> {
    /// Value stored for `key` in this version.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&'a V> {
        let root = self.root?;
        find(self.store, root, hash::hash_key(self.hasher, key), key)
    }

    /// Returns `true` if this version holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

impl<K, V, S, A> Clone for ChampView<'_, K, V, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S, A> Copy for ChampView<'_, K, V, S, A> {}

impl<K, V, S, A> fmt::Debug for ChampView<'_, K, V, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampView")
            .field("len", &self.size)
            .field("adhash", &self.adhash)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V, S, A: ChampStore<K, V>> IntoIterator for &ChampView<'a, K, V, S, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Iter<'a, K, V, A> {
        self.iter()
    }
}
