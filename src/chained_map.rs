//! Mutable hash map over a [`BucketTable`].

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::ops;

use crate::config::TableConfig;
use crate::error::{CapacityError, ConfigError};
use crate::hash::{self, DefaultHashBuilder};
use crate::table::{self, BucketTable};

/// Mutable hash map with sorted separate chaining.
///
/// Growth doubles the bucket array and splits chains in place without
/// rehashing. [`Clone`] is a deep copy: the clone and the original never
/// observe each other's mutations.
///
/// All mutation takes `&mut self`; there is no internal locking. Share a
/// map across threads only behind external synchronisation, or clone it
/// first.
pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    table: BucketTable<K, V>,
    hasher: S,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<K, V> ChainedHashMap<K, V> {
    /// Creates an empty map with 16 buckets and load factor 0.75.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableConfig::new())
    }

    /// Creates an empty map sized so that `capacity` entries fit without
    /// growing.
    ///
    /// # Panics
    ///
    /// Panics if the required bucket count exceeds
    /// [`MAX_CAPACITY`](crate::table::MAX_CAPACITY).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut map = Self::new();
        map.size_hint(capacity);
        map
    }

    /// Creates an empty map from `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` does not validate.
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Creates an empty map using `hasher` to hash keys.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(TableConfig::new(), hasher)
    }

    /// Creates an empty map from `config` and `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if `config` does not validate.
    #[must_use]
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Self {
        Self::try_with_config(config, hasher).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible variant of [`with_config_and_hasher`](Self::with_config_and_hasher).
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`TableConfig::validate`].
    pub fn try_with_config(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        Ok(Self {
            table: BucketTable::with_config(&config)?,
            hasher,
        })
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the configured load factor.
    #[must_use]
    pub const fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns the map's hasher builder.
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the underlying bucket table.
    #[must_use]
    pub const fn table(&self) -> &BucketTable<K, V> {
        &self.table
    }

    /// Removes all entries; the bucket array is kept.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(keep);
    }

    /// Grows the table once so that `expected` entries fit without further
    /// growth.
    ///
    /// # Panics
    ///
    /// Panics if the required bucket count exceeds
    /// [`MAX_CAPACITY`](crate::table::MAX_CAPACITY).
    pub fn size_hint(&mut self, expected: usize) {
        self.try_size_hint(expected)
            .unwrap_or_else(|e| panic!("{e}"));
    }

    /// Fallible variant of [`size_hint`](Self::size_hint).
    ///
    /// # Errors
    ///
    /// [`CapacityError`] if the required bucket count exceeds
    /// [`MAX_CAPACITY`](crate::table::MAX_CAPACITY); the map is unchanged.
    pub fn try_size_hint(&mut self, expected: usize) -> Result<(), CapacityError> {
        self.table.size_hint(expected)
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> table::Iter<'_, K, V> {
        self.table.iter()
    }

    /// Returns an iterator over `(&K, &mut V)` pairs.
    #[must_use]
    pub fn iter_mut(&mut self) -> table::IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }
}

// ---------------------------------------------------------------------------
// Keyed operations (K: Hash + Eq)
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> ChainedHashMap<K, V, S> {
    fn hash(&self, key: &K) -> u32 {
        hash::hash_key(&self.hasher, key)
    }

    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.find(self.hash(key), key).map(|e| &e.value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.table
            .find(self.hash(key), key)
            .map(|e| (&e.key, &e.value))
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash(key);
        self.table.find_mut(hash, key).map(|e| &mut e.value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Returns `None` if the key was new, or `Some(old_value)` if an existing
    /// value was replaced (the stored key is kept).
    ///
    /// # Panics
    ///
    /// Panics if growing would exceed [`MAX_CAPACITY`](crate::table::MAX_CAPACITY).
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash(&key);
        self.table
            .insert_or_update(hash, key, value)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Returns the value for `key`, inserting `make()` first if absent.
    ///
    /// # Panics
    ///
    /// Panics if growing would exceed [`MAX_CAPACITY`](crate::table::MAX_CAPACITY).
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let hash = self.hash(&key);
        self.table
            .get_or_insert_with(hash, key, make)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Removes a key from the map. Returns the removed value, or `None` if
    /// the key was not present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash(key);
        self.table.remove(hash, key)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainedHashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for ChainedHashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for ChainedHashMap<K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for ChainedHashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.size_hint(self.len().saturating_add(iter.size_hint().0));
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ChainedHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ops::Index<&K> for ChainedHashMap<K, V, S> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = table::Iter<'a, K, V>;

    fn into_iter(self) -> table::Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = table::IterMut<'a, K, V>;

    fn into_iter(self) -> table::IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = table::IntoIter<K, V>;

    fn into_iter(self) -> table::IntoIter<K, V> {
        self.table.into_iter()
    }
}
