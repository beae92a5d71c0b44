//! Iterative key lookup.

use safe_bump::Idx;

use crate::node::{self, Node};
use crate::store::ChampStore;

/// Searches for `key` in the subtree rooted at `node_idx`.
///
/// Iterative: at most `MAX_DEPTH` inner levels plus one collision node.
pub fn find<'a, K, V, S>(
    store: &'a S,
    mut node_idx: Idx<Node<K, V>>,
    hash: u32,
    key: &K,
) -> Option<&'a V>
where
    K: Eq + 'a,
    V: 'a,
    S: ChampStore<K, V>,
{
    let mut shift = 0;
    loop {
        match *store.get_node(node_idx) {
            Node::Inner {
                data_map,
                node_map,
                data_start,
                children_start,
                ..
            } => {
                let bit = node::mask(node::fragment(hash, shift));
                if data_map & bit != 0 {
                    let entry = store.entry_at(data_start, node::index(data_map, bit));
                    return (entry.hash == hash && entry.key == *key).then_some(&entry.value);
                }
                if node_map & bit == 0 {
                    return None;
                }
                let pos = node::index(node_map, bit);
                node_idx = store.child_idx_at(children_start, pos);
                shift += node::BIT_PARTITION_SIZE;
            }
            Node::Collision {
                hash: node_hash,
                entries_start,
                entries_len,
                ..
            } => {
                if hash != node_hash {
                    return None;
                }
                return (0..entries_len as usize)
                    .map(|i| store.entry_at(entries_start, i))
                    .find(|e| e.key == *key)
                    .map(|e| &e.value);
            }
        }
    }
}
