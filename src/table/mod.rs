//! Mutable open-chaining hash table.
//!
//! [`BucketTable`] is the engine behind [`ChainedHashMap`](crate::ChainedHashMap)
//! and [`ChainedHashSet`](crate::ChainedHashSet). It stores records that carry
//! an already-spread 32-bit hash; hashing keys is the caller's job.
//!
//! Every chain is kept sorted by hash. Lookups stop at the first record with
//! a larger hash, and growth splits each chain into a low and a high half
//! with a single bit test per record (see [`BucketTable::grow_table`]).
//!
//! The table has no interior synchronisation. All mutation goes through
//! `&mut self`; to hand a table to another thread while keeping a copy,
//! [`Clone`] it (every chain is rebuilt, nothing is shared).

use std::{fmt, mem, slice, vec};

use crate::config::TableConfig;
use crate::error::{CapacityError, ConfigError};

mod clone;
mod entry;
mod resize;

pub use entry::{Chain, HashEntry, Link};
pub use resize::{capacity_for, table_size_for, threshold};

/// Smallest bucket count.
pub const MIN_CAPACITY: usize = 4;

/// Largest bucket count; `capacity - 1` must stay a valid 30-bit mask.
pub const MAX_CAPACITY: usize = 1 << 30;

/// Array of sorted hash chains.
pub struct BucketTable<K, V> {
    buckets: Vec<Link<K, V>>,
    load_factor: f64,
    threshold: usize,
    count: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V> BucketTable<K, V> {
    /// Creates an empty table from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`TableConfig::validate`].
    pub fn with_config(config: &TableConfig) -> Result<Self, ConfigError> {
        let capacity = config.validate()?;
        Ok(Self::with_capacity(capacity, config.load_factor))
    }

    /// `capacity` must already be a power of two within bounds.
    fn with_capacity(capacity: usize, load_factor: f64) -> Self {
        debug_assert!(capacity.is_power_of_two() && capacity >= MIN_CAPACITY);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self {
            buckets,
            load_factor,
            threshold: threshold(capacity, load_factor),
            count: 0,
        }
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets (always a power of two).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the record count at which the next insert grows the table.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the configured load factor.
    #[must_use]
    pub const fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the records of bucket `index` in chain order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`.
    #[must_use]
    pub fn chain(&self, index: usize) -> Chain<'_, K, V> {
        Chain::new(self.buckets[index].as_deref())
    }

    /// Bucket index of a spread hash.
    #[inline]
    #[must_use]
    pub const fn index(&self, hash: u32) -> usize {
        hash as usize & (self.buckets.len() - 1)
    }

    /// Empties every bucket in place; capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            entry::drop_chain(bucket.take());
        }
        self.count = 0;
    }

    /// Keeps only the records for which `keep` returns `true`.
    ///
    /// Surviving records keep their chain order.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &mut V) -> bool) {
        for bucket in &mut self.buckets {
            let mut chain = bucket.take();
            let mut tail = bucket;
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                if keep(&entry.key, &mut entry.value) {
                    tail = &mut tail.insert(entry).next;
                } else {
                    self.count -= 1;
                }
            }
        }
    }

    /// Returns an iterator over `(&K, &V)` in bucket order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.count,
        }
    }

    /// Returns an iterator over `(&K, &mut V)` in bucket order.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            remaining: self.count,
            buckets: self.buckets.iter_mut(),
            chain: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Keyed operations (K: Eq)
// ---------------------------------------------------------------------------

impl<K: Eq, V> BucketTable<K, V> {
    /// Finds the record for `key`, whose spread hash is `hash`.
    ///
    /// Stops at the first record with a larger hash.
    #[must_use]
    pub fn find(&self, hash: u32, key: &K) -> Option<&HashEntry<K, V>> {
        self.chain(self.index(hash))
            .take_while(|e| e.hash <= hash)
            .find(|e| e.hash == hash && e.key == *key)
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, hash: u32, key: &K) -> Option<&mut HashEntry<K, V>> {
        let idx = self.index(hash);
        let mut link = self.buckets[idx].as_deref_mut();
        while let Some(entry) = link {
            if entry.hash > hash {
                return None;
            }
            if entry.hash == hash && entry.key == *key {
                return Some(entry);
            }
            link = entry.next.as_deref_mut();
        }
        None
    }

    /// Inserts `key → value`, or overwrites the value of an equal key.
    ///
    /// Returns the previous value on overwrite. When `len + 1` reaches the
    /// threshold the table doubles first.
    ///
    /// # Errors
    ///
    /// [`CapacityError`] if doubling would pass [`MAX_CAPACITY`]; the table
    /// is left unchanged.
    pub fn insert_or_update(
        &mut self,
        hash: u32,
        key: K,
        value: V,
    ) -> Result<Option<V>, CapacityError> {
        self.grow_for_insert()?;
        let slot = self.slot_for(hash, &key);
        if let Some(entry) = slot
            && entry.hash == hash
        {
            return Ok(Some(mem::replace(&mut entry.value, value)));
        }
        let next = slot.take();
        *slot = Some(Box::new(HashEntry::new(key, hash, value, next)));
        self.count += 1;
        Ok(None)
    }

    /// Returns the value for `key`, inserting `make()` first if absent.
    ///
    /// # Errors
    ///
    /// [`CapacityError`] as for [`insert_or_update`](Self::insert_or_update).
    ///
    /// # Panics
    ///
    /// Never in practice: the slot holds the record once the insert branch
    /// has run.
    pub fn get_or_insert_with(
        &mut self,
        hash: u32,
        key: K,
        make: impl FnOnce() -> V,
    ) -> Result<&mut V, CapacityError> {
        self.grow_for_insert()?;
        let idx = self.index(hash);
        let slot = entry::seek(&mut self.buckets[idx], |e| {
            e.hash < hash || (e.hash == hash && e.key != key)
        });
        if slot.as_ref().is_none_or(|e| e.hash != hash) {
            let next = slot.take();
            *slot = Some(Box::new(HashEntry::new(key, hash, make(), next)));
            self.count += 1;
        }
        Ok(&mut slot.as_mut().expect("slot holds the entry").value)
    }

    /// Unlinks the record for `key` and returns its key and value.
    pub fn remove(&mut self, hash: u32, key: &K) -> Option<(K, V)> {
        let slot = self.slot_for(hash, key);
        let found = slot.take_if(|e| e.hash == hash)?;
        let HashEntry {
            key, value, next, ..
        } = *found;
        *slot = next;
        self.count -= 1;
        Some((key, value))
    }

    /// Link holding either the record equal to `key` or the sorted
    /// insertion point for `hash`.
    fn slot_for(&mut self, hash: u32, key: &K) -> &mut Link<K, V> {
        let idx = self.index(hash);
        entry::seek(&mut self.buckets[idx], |e| {
            e.hash < hash || (e.hash == hash && e.key != *key)
        })
    }

    fn grow_for_insert(&mut self) -> Result<(), CapacityError> {
        if self.count + 1 >= self.threshold {
            self.grow_table(self.capacity() * 2)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Drop for BucketTable<K, V> {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            entry::drop_chain(bucket.take());
        }
    }
}

impl<K, V> fmt::Debug for BucketTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketTable")
            .field("len", &self.count)
            .field("capacity", &self.buckets.len())
            .field("threshold", &self.threshold)
            .field("load_factor", &self.load_factor)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V> IntoIterator for &'a BucketTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BucketTable<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for BucketTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            remaining: self.count,
            buckets: mem::take(&mut self.buckets).into_iter(),
            chain: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over `(&K, &V)` of a [`BucketTable`].
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Link<K, V>>,
    chain: Option<&'a HashEntry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` of a [`BucketTable`].
pub struct IterMut<'a, K, V> {
    buckets: slice::IterMut<'a, Link<K, V>>,
    chain: Option<&'a mut HashEntry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.take() {
                let HashEntry {
                    key, value, next, ..
                } = entry;
                self.chain = next.as_deref_mut();
                self.remaining -= 1;
                return Some((&*key, value));
            }
            self.chain = self.buckets.next()?.as_deref_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` of a [`BucketTable`].
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Link<K, V>>,
    chain: Link<K, V>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut entry) = self.chain.take() {
                self.chain = entry.next.take();
                self.remaining -= 1;
                let HashEntry { key, value, .. } = *entry;
                return Some((key, value));
            }
            self.chain = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        entry::drop_chain(self.chain.take());
        for bucket in self.buckets.by_ref() {
            entry::drop_chain(bucket);
        }
    }
}
