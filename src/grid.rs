// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ComputeGrid is one image's worth of intensities, shared by
//! every worker at once.
//!
//! Cells live in a single flat, row-major buffer.  Rows are reached
//! through an indirection table of row offsets, so exchanging two rows
//! is an exchange of two table slots and never touches the cells.
//! Workers only ever address disjoint cells (or disjoint table slots)
//! within a phase, and phases are separated by a barrier, so every
//! access can be a relaxed atomic load or store.  The barrier and the
//! final join supply the ordering.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use errors::Error;
use params::ParameterSet;
use planes::PlaneMapper;

/// A width x height grid of 8-bit intensities.
#[derive(Debug)]
pub struct ComputeGrid {
    width: usize,
    height: usize,
    cells: Vec<AtomicU8>,
    rows: Vec<AtomicUsize>,
}

fn reserve<T>(len: usize, width: usize, height: usize) -> Result<Vec<T>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| Error::Allocation { width, height })?;
    Ok(v)
}

impl ComputeGrid {
    /// Allocates a zeroed grid.  Grids too large to address or to
    /// allocate are reported rather than aborting the process.
    pub fn allocate(width: usize, height: usize) -> Result<ComputeGrid, Error> {
        let len = width
            .checked_mul(height)
            .ok_or(Error::Allocation { width, height })?;

        let mut cells = reserve(len, width, height)?;
        cells.extend((0..len).map(|_| AtomicU8::new(0)));
        let mut rows = reserve(height, width, height)?;
        rows.extend((0..height).map(|row| AtomicUsize::new(row * width)));

        Ok(ComputeGrid {
            width,
            height,
            cells,
            rows,
        })
    }

    /// Allocates a grid sized for the region a parameter set describes.
    pub fn for_params(params: &ParameterSet) -> Result<ComputeGrid, Error> {
        let plane = PlaneMapper::new(params);
        ComputeGrid::allocate(plane.width(), plane.height())
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(col < self.width, "column {} out of bounds", col);
        self.rows[row].load(Ordering::Relaxed) + col
    }

    /// Writes one cell.
    #[inline]
    pub fn store(&self, row: usize, col: usize, value: u8) {
        let offset = self.offset(row, col);
        self.cells[offset].store(value, Ordering::Relaxed);
    }

    /// Reads one cell.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        let offset = self.offset(row, col);
        self.cells[offset].load(Ordering::Relaxed)
    }

    /// Exchanges two whole rows in O(1).  The caller must be the only
    /// thread touching either row while this runs.
    pub fn swap_rows(&self, a: usize, b: usize) {
        let first = self.rows[a].load(Ordering::Relaxed);
        let second = self.rows[b].load(Ordering::Relaxed);
        self.rows[a].store(second, Ordering::Relaxed);
        self.rows[b].store(first, Ordering::Relaxed);
    }

    /// The cells of one row, left to right.
    pub fn row<'a>(&'a self, row: usize) -> impl Iterator<Item = u8> + 'a {
        let start = self.rows[row].load(Ordering::Relaxed);
        self.cells[start..start + self.width]
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
    }

    /// A plain copy of the grid, top row first.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height).map(|r| self.row(r).collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_zeroed_cells() {
        let grid = ComputeGrid::allocate(3, 2).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_rows(), vec![vec![0, 0, 0], vec![0, 0, 0]]);
    }

    #[test]
    fn store_and_get_address_row_major() {
        let grid = ComputeGrid::allocate(3, 2).unwrap();
        grid.store(0, 2, 7);
        grid.store(1, 0, 9);
        assert_eq!(grid.get(0, 2), 7);
        assert_eq!(grid.to_rows(), vec![vec![0, 0, 7], vec![9, 0, 0]]);
    }

    #[test]
    fn swapped_rows_keep_their_contents() {
        let grid = ComputeGrid::allocate(2, 3).unwrap();
        for r in 0..3 {
            for c in 0..2 {
                grid.store(r, c, (r * 10 + c) as u8);
            }
        }
        grid.swap_rows(0, 2);
        assert_eq!(grid.to_rows(), vec![vec![20, 21], vec![10, 11], vec![0, 1]]);
        // Writes after a swap land in the row now at that position.
        grid.store(0, 1, 99);
        assert_eq!(grid.row(0).collect::<Vec<u8>>(), vec![20, 99]);
    }

    #[test]
    fn empty_grids_are_fine() {
        let grid = ComputeGrid::allocate(0, 4).unwrap();
        assert_eq!(grid.to_rows(), vec![Vec::<u8>::new(); 4]);
        let grid = ComputeGrid::allocate(5, 0).unwrap();
        assert!(grid.to_rows().is_empty());
    }

    #[test]
    fn impossible_sizes_are_allocation_errors() {
        match ComputeGrid::allocate(usize::max_value(), 2) {
            Err(Error::Allocation { width, height }) => {
                assert_eq!((width, height), (usize::max_value(), 2))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
