//! Deep structural copy of a bucket table.

use tracing::trace;

use super::{BucketTable, HashEntry, Link};

/// Rebuilds every chain record by record. The copy shares no bucket array
/// and no record with `self`, so either side may be mutated freely.
impl<K: Clone, V: Clone> Clone for BucketTable<K, V> {
    fn clone(&self) -> Self {
        let buckets: Vec<Link<K, V>> = self
            .buckets
            .iter()
            .map(|head| clone_chain(head.as_deref()))
            .collect();
        trace!(
            capacity = buckets.len(),
            len = self.count,
            "bucket table deep-cloned"
        );
        Self {
            buckets,
            load_factor: self.load_factor,
            threshold: self.threshold,
            count: self.count,
        }
    }
}

fn clone_chain<K: Clone, V: Clone>(mut source: Option<&HashEntry<K, V>>) -> Link<K, V> {
    let mut head = None;
    let mut tail = &mut head;
    while let Some(entry) = source {
        let copy = HashEntry::new(entry.key.clone(), entry.hash, entry.value.clone(), None);
        tail = &mut tail.insert(Box::new(copy)).next;
        source = entry.next.as_deref();
    }
    head
}
