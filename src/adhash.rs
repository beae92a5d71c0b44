//! `AdHash`: incremental structural hashing of trie contents.
//!
//! Computes `φ(S) = Σ f(k, v)` over all entries using wrapping arithmetic.
//! Each trie node caches `φ` of its subtree, so a map's fingerprint is its
//! root's cached value. Two mixing seeds prevent degeneration when
//! `hash(v) = 0`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// First mixing seed (golden ratio constant).
const SEED_1: u64 = 0x9E37_79B9_7F4A_7C15;

/// Second mixing seed (large prime).
const SEED_2: u64 = 0x517C_C1B7_2722_0A95;

/// Computes the 64-bit hash of a value with the fixed-key standard hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Computes the `AdHash` contribution of a single entry.
///
/// `f(k, v) = key_hash · SEED₁ ⊕ value_hash · SEED₂`, where `key_hash` is
/// the entry's spread trie hash.
#[must_use]
pub const fn entry_adhash(key_hash: u32, value_hash: u64) -> u64 {
    (key_hash as u64).wrapping_mul(SEED_1) ^ value_hash.wrapping_mul(SEED_2)
}

/// `AdHash` contribution of an entry whose value is `value`.
#[must_use]
pub fn contribution<V: Hash>(key_hash: u32, value: &V) -> u64 {
    entry_adhash(key_hash, hash_one(value))
}
