//! Construction parameters for chained hash tables.

use crate::error::ConfigError;
use crate::table::{self, MAX_CAPACITY};

/// Default number of buckets.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Default load factor.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Sizing of a [`ChainedHashMap`](crate::ChainedHashMap) or
/// [`ChainedHashSet`](crate::ChainedHashSet).
///
/// `initial_capacity` is rounded up to a power of two (at least 4) when the
/// table is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Requested number of buckets.
    pub initial_capacity: usize,
    /// Growth is triggered once `len + 1` reaches `capacity * load_factor`.
    pub load_factor: f64,
}

impl TableConfig {
    /// Returns the default configuration (16 buckets, load factor 0.75).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }

    /// Sets the requested number of buckets.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor.
    #[must_use]
    pub const fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks the configuration and returns the bucket count it resolves to.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidLoadFactor`] for a NaN, infinite or non-positive
    /// load factor; [`ConfigError::Capacity`] when the rounded capacity
    /// exceeds [`MAX_CAPACITY`].
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        let capacity = table::table_size_for(self.initial_capacity)?;
        debug_assert!(capacity <= MAX_CAPACITY);
        Ok(capacity)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}
