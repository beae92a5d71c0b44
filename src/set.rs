//! Persistent hash set over a [`ChampMap`].

use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::ChampMap;
use crate::arena::ChampArena;
use crate::hash::DefaultHashBuilder;
use crate::iter::Keys;

/// Persistent hash set: a [`ChampMap`] with unit values.
///
/// Shares the map's canonical form, so equal sets have equal
/// [`adhash`](Self::adhash) under the default hasher.
pub struct ChampSet<T, S = DefaultHashBuilder> {
    map: ChampMap<T, (), S>,
}

impl<T> ChampSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: ChampMap::new(),
        }
    }
}

impl<T, S> ChampSet<T, S> {
    /// Creates an empty set using `hasher` to hash elements.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            map: ChampMap::with_hasher(hasher),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the set's `AdHash`.
    #[must_use]
    pub const fn adhash(&self) -> u64 {
        self.map.adhash()
    }

    /// Removes every element.
    pub const fn clear(&mut self) {
        self.map.clear();
    }

    /// Length in edges of the longest root-to-node path.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.map.max_depth()
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Keys<'_, T, (), ChampArena<T, ()>> {
        self.map.keys()
    }
}

impl<T: Hash + Eq, S: BuildHasher> ChampSet<T, S> {
    /// Returns `true` if `value` is in the set.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }
}

impl<T: Hash + Eq + Clone, S: BuildHasher> ChampSet<T, S> {
    /// Adds `value`. Returns `true` if it was not already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }
}

impl<T> Default for ChampSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChampSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq for ChampSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Hash + Eq, S: BuildHasher> Eq for ChampSet<T, S> {}

impl<T: Hash + Eq + Clone, S: BuildHasher> Extend<T> for ChampSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for ChampSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, S> IntoIterator for &'a ChampSet<T, S> {
    type Item = &'a T;
    type IntoIter = Keys<'a, T, (), ChampArena<T, ()>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
