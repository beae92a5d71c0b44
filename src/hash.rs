//! Key hashing shared by both engines.
//!
//! A key's 64-bit hash from the collection's [`BuildHasher`] is folded to
//! 32 bits and then spread so that high bits influence the low bits that a
//! power-of-two mask (or a 5-bit trie fragment) looks at. Only spread hashes
//! are ever stored.

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

/// Deterministic hasher builder used by default.
///
/// Fixed keys make [`AdHash`](crate::adhash) values comparable between maps.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// Mixes the upper 16 bits into the lower 16: `h ^ (h >> 16)`.
#[inline]
#[must_use]
pub const fn spread(h: u32) -> u32 {
    h ^ (h >> 16)
}

/// Folds a 64-bit hash to 32 bits by xor-ing its halves.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn fold(h: u64) -> u32 {
    (h as u32) ^ ((h >> 32) as u32)
}

/// Computes the spread 32-bit hash of `key`.
#[inline]
pub fn hash_key<Q, S>(build: &S, key: &Q) -> u32
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    spread(fold(build.hash_one(key)))
}
