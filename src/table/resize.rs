//! Threshold tracking and order-preserving growth.

use tracing::{debug, trace};

use super::{BucketTable, Link, MAX_CAPACITY, MIN_CAPACITY};
use crate::error::CapacityError;

/// `floor(capacity * load_factor)`, saturating at `usize::MAX`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub const fn threshold(capacity: usize, load_factor: f64) -> usize {
    (capacity as f64 * load_factor).floor() as usize
}

/// Smallest power of two `>= capacity` and `>= MIN_CAPACITY`.
///
/// # Errors
///
/// [`CapacityError`] if that power of two exceeds [`MAX_CAPACITY`].
pub fn table_size_for(capacity: usize) -> Result<usize, CapacityError> {
    capacity
        .max(MIN_CAPACITY)
        .checked_next_power_of_two()
        .filter(|&size| size <= MAX_CAPACITY)
        .ok_or(CapacityError {
            requested: capacity,
            max: MAX_CAPACITY,
        })
}

/// Bucket count needed to hold `expected` records without growing.
///
/// # Errors
///
/// [`CapacityError`] as for [`table_size_for`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn capacity_for(expected: usize, load_factor: f64) -> Result<usize, CapacityError> {
    let buckets = ((expected as f64 + 1.0) / load_factor).ceil() as usize;
    table_size_for(buckets)
}

impl<K, V> BucketTable<K, V> {
    /// Grows the table to `new_capacity` buckets (rounded up to a power of
    /// two).
    ///
    /// Each doubling `L → 2L` walks buckets `0..L` once and splits every
    /// chain on bit `L` of the stored hash: records with the bit clear stay
    /// at `i`, the others move to `i + L`. Both halves keep their relative
    /// order, so chains stay sorted. Keys are never rehashed. A request at or
    /// below the current capacity is a no-op.
    ///
    /// # Errors
    ///
    /// [`CapacityError`] if `new_capacity` exceeds [`MAX_CAPACITY`]; the
    /// table is left unchanged.
    ///
    /// # Panics
    ///
    /// Never in practice: every intermediate capacity is at most
    /// [`MAX_CAPACITY`] and so fits the `u32` split bit.
    pub fn grow_table(&mut self, new_capacity: usize) -> Result<(), CapacityError> {
        let new_capacity = table_size_for(new_capacity)?;
        let old_capacity = self.buckets.len();
        if new_capacity <= old_capacity {
            return Ok(());
        }

        self.buckets.resize_with(new_capacity, || None);
        let mut moved = 0_usize;
        let mut len = old_capacity;
        while len < new_capacity {
            let bit = u32::try_from(len).expect("capacity bounded by MAX_CAPACITY");
            let (low, high) = self.buckets.split_at_mut(len);
            for (low_slot, high_slot) in low.iter_mut().zip(high.iter_mut()) {
                if low_slot.is_some() {
                    moved += split_chain(low_slot, high_slot, bit);
                }
            }
            len *= 2;
        }

        self.threshold = threshold(new_capacity, self.load_factor);
        debug!(
            old_capacity,
            new_capacity,
            moved,
            threshold = self.threshold,
            len = self.count,
            "bucket table grown"
        );
        Ok(())
    }

    /// Grows once, up front, so that `expected` records fit below the
    /// threshold.
    ///
    /// # Errors
    ///
    /// [`CapacityError`] if the required capacity exceeds [`MAX_CAPACITY`].
    pub fn size_hint(&mut self, expected: usize) -> Result<(), CapacityError> {
        let target = capacity_for(expected, self.load_factor)?;
        if target > self.buckets.len() {
            trace!(expected, target, "pre-sizing bucket table");
            self.grow_table(target)?;
        }
        Ok(())
    }
}

/// Moves every record of `low` with `hash & bit != 0` onto the empty chain
/// `high`, preserving order in both. Returns the number moved.
fn split_chain<K, V>(low: &mut Link<K, V>, high: &mut Link<K, V>, bit: u32) -> usize {
    debug_assert!(high.is_none());
    let mut chain = low.take();
    let mut low_tail = low;
    let mut high_tail = high;
    let mut moved = 0;
    while let Some(mut entry) = chain {
        chain = entry.next.take();
        if entry.hash & bit == 0 {
            low_tail = &mut low_tail.insert(entry).next;
        } else {
            high_tail = &mut high_tail.insert(entry).next;
            moved += 1;
        }
    }
    moved
}
