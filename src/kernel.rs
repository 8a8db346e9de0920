// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel shared by the Julia and Mandelbrot maps.
//!
//! Both maps iterate `z = z² + c` and count the steps until `z`
//! leaves the disc of radius 2 or the iteration cap is reached.  They
//! differ only in which of `z₀` and `c` comes from the pixel.

use itertools::iproduct;
use num::Complex;
use std::ops::Range;

use grid::ComputeGrid;
use params::{Fractal, ParameterSet};
use planes::{Pixel, PlaneMapper};

/// Number of steps taken before `z` escapes, at most `cap`.
///
/// The magnitude is computed as `sqrt(re² + im²)` and compared with
/// `>= 2.0`, which is what reference images were produced with; do not
/// replace it with `norm_sqr() >= 4.0` or `norm()`, they round
/// differently right at the boundary.
#[inline]
pub fn escape_time(z0: Complex<f64>, c: Complex<f64>, cap: u32) -> u32 {
    let mut z = z0;
    let mut step = 0;
    while (z.re * z.re + z.im * z.im).sqrt() < 2.0 && step < cap {
        z = z * z + c;
        step += 1;
    }
    step
}

/// The stored intensity for a step count.
#[inline]
pub fn intensity(steps: u32) -> u8 {
    (steps % 256) as u8
}

/// Starting value and constant for the pixel at `point`.
#[inline]
pub fn seed(fractal: &Fractal, point: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    match *fractal {
        Fractal::Mandelbrot => (Complex::new(0.0, 0.0), point),
        Fractal::Julia { c } => (point, c),
    }
}

/// Fills every cell in `columns`, over the full height of the grid.
/// Rows are in mathematical orientation: row 0 is `y_min`.
pub fn compute_columns(params: &ParameterSet, grid: &ComputeGrid, columns: Range<usize>) {
    let plane = PlaneMapper::new(params);
    for (column, row) in iproduct!(columns, 0..grid.height()) {
        let point = plane.pixel_to_point(&Pixel(column, row));
        let (z0, c) = seed(&params.fractal, point);
        grid.store(row, column, intensity(escape_time(z0, c, params.iteration_cap)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes_the_mandelbrot_map() {
        let zero = Complex::new(0.0, 0.0);
        assert_eq!(escape_time(zero, zero, 10), 10);
        assert_eq!(intensity(escape_time(zero, zero, 300)), 44);
        assert_eq!(intensity(escape_time(zero, zero, 256)), 0);
    }

    #[test]
    fn radius_two_counts_as_escaped() {
        assert_eq!(escape_time(Complex::new(2.0, 0.0), Complex::new(0.0, 0.0), 50), 0);
        assert_eq!(escape_time(Complex::new(0.0, -2.0), Complex::new(0.0, 0.0), 50), 0);
        assert_eq!(escape_time(Complex::new(1.99, 0.0), Complex::new(0.0, 0.0), 50), 1);
    }

    #[test]
    fn zero_cap_takes_no_steps() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0), 0), 0);
    }

    #[test]
    fn known_mandelbrot_escapes() {
        let zero = Complex::new(0.0, 0.0);
        // 0 -> -1-i -> -1+i -> -1-3i
        assert_eq!(escape_time(zero, Complex::new(-1.0, -1.0), 10), 3);
        // c = 1: 0 -> 1 -> 2
        assert_eq!(escape_time(zero, Complex::new(1.0, 0.0), 10), 2);
        // c = -1 cycles between 0 and -1.
        assert_eq!(escape_time(zero, Complex::new(-1.0, 0.0), 10), 10);
    }

    #[test]
    fn seeds_swap_roles_between_maps() {
        let p = Complex::new(0.5, -0.25);
        let k = Complex::new(-0.8, 0.156);
        assert_eq!(seed(&Fractal::Mandelbrot, p), (Complex::new(0.0, 0.0), p));
        assert_eq!(seed(&Fractal::Julia { c: k }, p), (p, k));
    }

    #[test]
    fn compute_columns_touches_only_its_columns() {
        let params =
            ParameterSet::new(Fractal::Mandelbrot, (-1.0, 1.0), (-1.0, 1.0), 0.5, 10).unwrap();
        let grid = ComputeGrid::for_params(&params).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 4));
        compute_columns(&params, &grid, 2..3);
        for row in 0..4 {
            for column in 0..4 {
                if column != 2 {
                    assert_eq!(grid.get(row, column), 0);
                }
            }
        }
        // Column 2, row 2 samples the origin.
        assert_eq!(grid.get(2, 2), 10);
    }

    #[test]
    fn julia_pixels_use_the_fixed_constant() {
        let c = Complex::new(-1.0, 0.0);
        let params =
            ParameterSet::new(Fractal::Julia { c }, (0.0, 1.0), (0.0, 1.0), 1.0, 10).unwrap();
        let grid = ComputeGrid::for_params(&params).unwrap();
        compute_columns(&params, &grid, 0..1);
        // z0 = 0 with c = -1 is the period-two cycle.
        assert_eq!(grid.to_rows(), vec![vec![10]]);
    }
}
