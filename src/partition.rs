//! Static work division.  Every worker gets one contiguous slice of
//! a dimension, decided up front from nothing but its id.

use std::ops::Range;

/// The share of `0..size` that worker `id` of `workers` owns.
///
/// Shares are disjoint, ordered by id, cover the whole range, and
/// differ in length by at most one.  When there are more workers than
/// elements some shares are empty.
pub fn partition(id: usize, workers: usize, size: usize) -> Range<usize> {
    assert!(id < workers, "worker {} of {}", id, workers);
    let start = id * size / workers;
    let end = ((id + 1) * size / workers).min(size);
    start..end
}
