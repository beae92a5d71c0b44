mod adhash;
mod basic;
mod chained;
mod persistence;
mod properties;
mod traits;

use std::hash::{BuildHasherDefault, Hash, Hasher};

/// Hasher that returns the last integer written to it.
///
/// Integer keys below `2^16` hash to themselves after folding and
/// spreading, which makes bucket and fragment positions predictable.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = u64::try_from(n).expect("usize fits in u64");
    }
}

/// Builder for [`IdentityHasher`].
pub type BuildIdentity = BuildHasherDefault<IdentityHasher>;

/// Key whose hash is chosen by the test, so distinct keys can share a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedHash {
    pub id: u32,
    pub hash: u32,
}

impl ForcedHash {
    pub const fn new(id: u32, hash: u32) -> Self {
        Self { id, hash }
    }
}

impl Hash for ForcedHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}
