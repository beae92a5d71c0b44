//! Hash collection engine with two backends.
//!
//! - [`ChainedHashMap`] / [`ChainedHashSet`]: a mutable separate-chaining
//!   table. Chains are kept sorted by spread hash, so growth splits each
//!   chain into a low and a high half by testing one bit, without rehashing
//!   and without reordering. [`Clone`] is a deep, independent copy.
//! - [`ChampMap`] / [`ChampMapSync`] / [`ChampSet`]: persistent maps on a
//!   CHAMP (Compressed Hash-Array Mapped Prefix-tree). CHAMP guarantees
//!   **canonical form**: the same set of key-value pairs always produces the
//!   same trie structure, regardless of insertion order. Tries are read
//!   through [`ChampIterator`](iter::ChampIterator), a non-recursive
//!   depth-first iterator with fixed-size stacks.
//!
//! Both backends implement [`HashBackend`].
//!
//! # Key properties
//!
//! - **Order-preserving splits**: a chain's relative order survives growth
//! - **Canonical form**: same contents = same trie structure
//! - **O(1) structural equality**: via incrementally maintained `AdHash`
//! - **COW structural sharing**: checkpointed versions stay readable through
//!   [`ChampMapBase::view`] next to the live map, or can be rolled back to
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use champ_chain::{ChainedHashMap, ChampMap, HashBackend};
//!
//! fn fill<B: HashBackend<u32, &'static str>>(backend: &mut B) {
//!     backend.reserve(2);
//!     backend.insert(1, "one");
//!     backend.insert(2, "two");
//! }
//!
//! let mut chained = ChainedHashMap::new();
//! let mut champ = ChampMap::new();
//! fill(&mut chained);
//! fill(&mut champ);
//! assert_eq!(chained.get(&2), champ.get(&2));
//! ```
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015: "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001: "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

use safe_bump::Idx;

pub mod adhash;
pub mod backend;
pub mod config;
pub mod error;
pub mod hash;
pub mod iter;
pub mod node;
pub mod store;
pub mod table;

mod arena;
mod chained_map;
mod chained_set;
mod map;
mod ops;
mod set;
mod view;

#[cfg(test)]
mod tests;

pub use arena::{ChampArena, ChampArenaSync};
pub use backend::HashBackend;
pub use chained_map::ChainedHashMap;
pub use chained_set::ChainedHashSet;
pub use config::TableConfig;
pub use error::{CapacityError, ConfigError};
pub use hash::DefaultHashBuilder;
pub use map::{ChampMap, ChampMapBase, ChampMapSync};
pub use set::ChampSet;
pub use view::ChampView;

/// Saved map state for rollback.
///
/// Created by [`ChampMapBase::checkpoint`]. Restoring via `rollback`
/// discards all changes made after the checkpoint.
pub struct ChampCheckpoint<K, V> {
    /// Three-arena store checkpoint.
    pub store: store::StoreCheckpoint<K, V>,
    /// Root node index at checkpoint time.
    pub root: Option<Idx<node::Node<K, V>>>,
    /// Entry count at checkpoint time.
    pub size: usize,
    /// `AdHash` at checkpoint time.
    pub adhash: u64,
}

impl<K, V> Clone for ChampCheckpoint<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for ChampCheckpoint<K, V> {}

impl<K, V> fmt::Debug for ChampCheckpoint<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampCheckpoint")
            .field("size", &self.size)
            .field("adhash", &self.adhash)
            .finish_non_exhaustive()
    }
}
