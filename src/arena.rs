//! Arena-backed CHAMP storage.
//!
//! Each store keeps three append-only arenas: nodes, inline entries and
//! child pointers. Path-copying appends new blocks and leaves older blocks
//! untouched, so unaffected subtrees are shared by index between versions.

use safe_bump::{Arena, Idx, SharedArena};

use crate::node::{Entry, Node};
use crate::store::{ChampStore, StoreCheckpoint};

macro_rules! champ_arena {
    ($(#[$doc:meta])* $name:ident, $arena:ident) => {
        $(#[$doc])*
        pub struct $name<K, V> {
            nodes: $arena<Node<K, V>>,
            entries: $arena<Entry<K, V>>,
            children: $arena<Idx<Node<K, V>>>,
        }

        impl<K, V> $name<K, V> {
            /// Creates an empty store.
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    nodes: $arena::new(),
                    entries: $arena::new(),
                    children: $arena::new(),
                }
            }
        }

        impl<K, V> Default for $name<K, V> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<K, V> ChampStore<K, V> for $name<K, V> {
            fn alloc_node(&mut self, node: Node<K, V>) -> Idx<Node<K, V>> {
                self.nodes.alloc(node)
            }

            fn get_node(&self, idx: Idx<Node<K, V>>) -> &Node<K, V> {
                self.nodes.get(idx)
            }

            fn alloc_entries(
                &mut self,
                iter: impl IntoIterator<Item = Entry<K, V>>,
            ) -> Option<Idx<Entry<K, V>>> {
                self.entries.alloc_extend(iter)
            }

            fn get_entry(&self, idx: Idx<Entry<K, V>>) -> &Entry<K, V> {
                self.entries.get(idx)
            }

            fn alloc_children(
                &mut self,
                iter: impl IntoIterator<Item = Idx<Node<K, V>>>,
            ) -> Option<Idx<Idx<Node<K, V>>>> {
                self.children.alloc_extend(iter)
            }

            fn get_child(&self, idx: Idx<Idx<Node<K, V>>>) -> &Idx<Node<K, V>> {
                self.children.get(idx)
            }

            fn checkpoint(&self) -> StoreCheckpoint<K, V> {
                StoreCheckpoint {
                    nodes: self.nodes.checkpoint(),
                    entries: self.entries.checkpoint(),
                    children: self.children.checkpoint(),
                }
            }

            fn rollback(&mut self, cp: StoreCheckpoint<K, V>) {
                self.nodes.rollback(cp.nodes);
                self.entries.rollback(cp.entries);
                self.children.rollback(cp.children);
            }

            fn arena_len(&self) -> (usize, usize, usize) {
                (self.nodes.len(), self.entries.len(), self.children.len())
            }
        }
    };
}

champ_arena!(
    /// Single-threaded storage backend using three [`Arena`]s.
    ChampArena,
    Arena
);

champ_arena!(
    /// Thread-safe storage backend using three [`SharedArena`]s.
    ///
    /// Readers on other threads may traverse the trie through a shared
    /// reference while no writer holds `&mut`.
    ChampArenaSync,
    SharedArena
);
