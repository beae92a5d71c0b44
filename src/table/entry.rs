//! Chain records and owned-link helpers.

/// Owning link to the next record of a chain (or the chain head in a bucket).
pub type Link<K, V> = Option<Box<HashEntry<K, V>>>;

/// One record of a bucket chain.
///
/// Chains are ordered by non-decreasing `hash`.
pub struct HashEntry<K, V> {
    /// The key.
    pub key: K,
    /// Spread 32-bit hash of the key.
    pub hash: u32,
    /// The value (`()` for sets).
    pub value: V,
    /// Next record of the chain.
    pub next: Link<K, V>,
}

impl<K, V> HashEntry<K, V> {
    /// Creates a record linked in front of `next`.
    #[must_use]
    pub const fn new(key: K, hash: u32, value: V, next: Link<K, V>) -> Self {
        Self {
            key,
            hash,
            value,
            next,
        }
    }
}

/// Advances past every record for which `skip` holds and returns the link
/// that points at the first record failing it (or the empty tail link).
pub fn seek<K, V>(
    mut link: &mut Link<K, V>,
    mut skip: impl FnMut(&HashEntry<K, V>) -> bool,
) -> &mut Link<K, V> {
    while link.as_deref().is_some_and(&mut skip) {
        if let Some(entry) = link {
            link = &mut entry.next;
        }
    }
    link
}

/// Drops a chain record by record.
///
/// `Box` drop glue would recurse once per record.
pub fn drop_chain<K, V>(mut link: Link<K, V>) {
    while let Some(mut entry) = link {
        link = entry.next.take();
    }
}

/// Borrowing walk over one chain.
pub struct Chain<'a, K, V> {
    next: Option<&'a HashEntry<K, V>>,
}

impl<'a, K, V> Chain<'a, K, V> {
    pub(crate) const fn new(head: Option<&'a HashEntry<K, V>>) -> Self {
        Self { next: head }
    }
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = &'a HashEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(entry)
    }
}
