//! Mutable hash set over a [`BucketTable`](crate::table::BucketTable).

use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::chained_map::ChainedHashMap;
use crate::config::TableConfig;
use crate::hash::DefaultHashBuilder;
use crate::table;

/// Mutable hash set; a [`ChainedHashMap`] with `()` values.
pub struct ChainedHashSet<T, S = DefaultHashBuilder> {
    map: ChainedHashMap<T, (), S>,
}

impl<T> ChainedHashSet<T> {
    /// Creates an empty set with 16 buckets and load factor 0.75.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: ChainedHashMap::new(),
        }
    }

    /// Creates an empty set from `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` does not validate.
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            map: ChainedHashMap::with_config(config),
        }
    }
}

impl<T, S> ChainedHashSet<T, S> {
    /// Creates an empty set using `hasher` to hash elements.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            map: ChainedHashMap::with_hasher(hasher),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of buckets.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.map.retain(|k, ()| keep(k));
    }

    /// Grows once so that `expected` elements fit without further growth.
    ///
    /// # Panics
    ///
    /// Panics if the required bucket count exceeds
    /// [`MAX_CAPACITY`](crate::table::MAX_CAPACITY).
    pub fn size_hint(&mut self, expected: usize) {
        self.map.size_hint(expected);
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

impl<T: Hash + Eq, S: BuildHasher> ChainedHashSet<T, S> {
    /// Adds `value`. Returns `false` if an equal element was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the stored element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.map.remove_entry(value).map(|(k, ())| k)
    }
}

/// Iterator over the elements of a [`ChainedHashSet`].
pub struct Iter<'a, T> {
    inner: table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(k, ())| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Default for ChainedHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: Clone> Clone for ChainedHashSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChainedHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq for ChainedHashSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Hash + Eq, S: BuildHasher> Eq for ChainedHashSet<T, S> {}

impl<T: Hash + Eq, S: BuildHasher> Extend<T> for ChainedHashSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|v| (v, ())));
    }
}

impl<T: Hash + Eq> FromIterator<T> for ChainedHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, S> IntoIterator for &'a ChainedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
