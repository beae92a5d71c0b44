//! Error types.
//!
//! Absent keys are reported as `None`, never as an error. The errors here are
//! limit and configuration violations that leave a table unusable if ignored.

use thiserror::Error;

/// A requested bucket capacity exceeds [`MAX_CAPACITY`](crate::table::MAX_CAPACITY).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("requested table capacity {requested} exceeds maximum {max}")]
pub struct CapacityError {
    /// Capacity that was asked for (before rounding, saturated to `usize`).
    pub requested: usize,
    /// Largest capacity a table can have.
    pub max: usize,
}

/// A [`TableConfig`](crate::TableConfig) that cannot describe a valid table.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Load factor is NaN, infinite, zero or negative.
    #[error("load factor must be finite and > 0, got {0}")]
    InvalidLoadFactor(f64),

    /// Initial capacity is larger than a table may ever grow.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
