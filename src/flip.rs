//! Turns a grid from mathematical orientation (row 0 at `y_min`) into
//! screen orientation (row 0 at the top) by mirroring it vertically.
//! Each worker mirrors its own share of row pairs; the middle row of
//! an odd-height grid stays where it is.

use std::ops::Range;

use grid::ComputeGrid;

/// Exchanges row `i` with row `height - 1 - i` for every `i` in
/// `pairs`, which must lie within `0..height / 2`.
pub fn flip_rows(grid: &ComputeGrid, pairs: Range<usize>) {
    let height = grid.height();
    debug_assert!(pairs.end <= height / 2);
    for i in pairs {
        grid.swap_rows(i, height - 1 - i);
    }
}
