#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time renderer
//!
//! Draws a Julia image and a Mandelbrot image with a fixed pool of
//! worker threads.  Both maps repeatedly square a complex number and
//! add a constant, counting how many steps it takes the number to
//! leave the disc of radius two.  That count, modulo 256, is the
//! pixel's intensity.
//!
//! Every worker owns a fixed slice of each image's columns, computed
//! from its id alone, so the workers never write the same cell.  Once
//! all of them have finished an image, they mirror it top to bottom,
//! each owning a fixed slice of the row pairs, so that row zero ends
//! up at the top of the picture.  A barrier per image separates the
//! two phases; nothing else is shared and nothing is locked.

#[macro_use]
extern crate failure;
extern crate crossbeam;
extern crate itertools;
extern crate num;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempfile;

pub mod errors;
pub mod flip;
pub mod grid;
pub mod kernel;
pub mod params;
pub mod partition;
pub mod pgm;
pub mod planes;
pub mod render;

pub use errors::Error;
pub use grid::ComputeGrid;
pub use params::{Fractal, ParameterSet};
pub use render::Renderer;
