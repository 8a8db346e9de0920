//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and the region of the complex plane a ParameterSet asks for.  The
//! integral plane is sized by how many whole resolution steps fit
//! into the region.
use num::Complex;

use params::ParameterSet;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel in the integral plane, in
/// mathematical orientation: row 0 is the bottom of the region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane onto points of the complex plane.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    // The left-lower corner of the region, and the step between pixels.
    origin: Complex<f64>,
    resolution: f64,
}

impl PlaneMapper {
    /// Derives the integral plane from a parameter set.  Partial
    /// steps at the right and top edges are dropped.
    pub fn new(params: &ParameterSet) -> PlaneMapper {
        let width = ((params.x_max - params.x_min) / params.resolution) as usize;
        let height = ((params.y_max - params.y_min) / params.resolution) as usize;
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            origin: Complex::new(params.x_min, params.y_min),
            resolution: params.resolution,
        }
    }

    /// Width of the integral plane in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the integral plane in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// point it samples on the complex plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            (pixel.0 as f64) * self.resolution + self.origin.re,
            (pixel.1 as f64) * self.resolution + self.origin.im,
        )
    }
}
