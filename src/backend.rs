//! Common surface of the two hash engines.
//!
//! [`HashBackend`] lets callers and benchmarks drive either the chained
//! table or the CHAMP trie through one interface. The engines keep their own
//! semantics: the chained map mutates in place, the trie path-copies.

use std::hash::{BuildHasher, Hash};

use crate::ChainedHashMap;
use crate::map::ChampMapBase;
use crate::store::ChampStore;
use crate::table;

/// Key-value operations shared by [`ChainedHashMap`] and
/// [`ChampMap`](crate::ChampMap).
pub trait HashBackend<K, V> {
    /// Iterator over `(&K, &V)` pairs.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored for `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or overwrites; returns the previous value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`; returns its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every entry.
    fn clear(&mut self);

    /// Prepares for `additional` more entries. A no-op where storage is not
    /// pre-sized.
    fn reserve(&mut self, additional: usize);

    /// Returns an iterator over the entries.
    fn iter(&self) -> Self::Iter<'_>;
}

impl<K: Hash + Eq, V, S: BuildHasher> HashBackend<K, V> for ChainedHashMap<K, V, S> {
    type Iter<'a>
        = table::Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Self::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn reserve(&mut self, additional: usize) {
        self.size_hint(self.len().saturating_add(additional));
    }

    fn iter(&self) -> Self::Iter<'_> {
        Self::iter(self)
    }
}

impl<K, V, S, A> HashBackend<K, V> for ChampMapBase<K, V, S, A>
where
    K: Hash + Eq + Clone,
    V: Hash + Clone,
    S: BuildHasher,
    A: ChampStore<K, V>,
{
    type Iter<'a>
        = crate::iter::Iter<'a, K, V, A>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Self::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn reserve(&mut self, _additional: usize) {}

    fn iter(&self) -> Self::Iter<'_> {
        Self::iter(self)
    }
}
