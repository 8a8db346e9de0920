// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-image configuration: which fractal, what part of the
//! complex plane, how finely to sample it, and how long to iterate.
//!
//! A parameter file is a handful of whitespace-separated tokens:
//!
//! ```text
//! <is_julia: 0|1>
//! <x_min> <x_max> <y_min> <y_max>
//! <resolution>
//! <iteration_cap>
//! [<c_re> <c_im>]     only for Julia images
//! ```

use num::Complex;
use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use errors::Error;

/// Which escape-time map to draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fractal {
    /// `z` starts at zero and `c` is the pixel's point.
    Mandelbrot,
    /// `z` starts at the pixel's point and `c` is fixed for the image.
    Julia {
        /// The constant added at every step.
        c: Complex<f64>,
    },
}

/// Immutable configuration for a single image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterSet {
    /// The map being drawn.
    pub fractal: Fractal,
    /// Maximum number of iterations per pixel.
    pub iteration_cap: u32,
    /// Left edge of the region.
    pub x_min: f64,
    /// Right edge of the region.
    pub x_max: f64,
    /// Bottom edge of the region.
    pub y_min: f64,
    /// Top edge of the region.
    pub y_max: f64,
    /// Distance on the plane between two neighbouring pixels.
    pub resolution: f64,
}

impl ParameterSet {
    /// Builds and validates a parameter set.
    pub fn new(
        fractal: Fractal,
        (x_min, x_max): (f64, f64),
        (y_min, y_max): (f64, f64),
        resolution: f64,
        iteration_cap: u32,
    ) -> Result<Self, String> {
        let finite = [x_min, x_max, y_min, y_max, resolution]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err("region bounds and resolution must be finite numbers".to_string());
        }
        if let Fractal::Julia { c } = fractal {
            if !(c.re.is_finite() && c.im.is_finite()) {
                return Err("the Julia constant must be a finite number".to_string());
            }
        }
        if x_min >= x_max {
            return Err("x_min is not to the left of x_max".to_string());
        }
        if y_min >= y_max {
            return Err("y_min is not below y_max".to_string());
        }
        if resolution <= 0.0 {
            return Err("resolution must be positive".to_string());
        }

        Ok(ParameterSet {
            fractal,
            iteration_cap,
            x_min,
            x_max,
            y_min,
            y_max,
            resolution,
        })
    }

    /// Reads a parameter file.  Failing to read the file and failing
    /// to make sense of it are reported as different errors.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|cause| Error::InputFile {
            path: path.display().to_string(),
            cause,
        })?;
        text.parse::<ParameterSet>().map_err(|e| match e {
            Error::Parameters { reason, .. } => Error::Parameters {
                origin: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// True for Julia-type images.
    pub fn is_julia(&self) -> bool {
        match self.fractal {
            Fractal::Julia { .. } => true,
            Fractal::Mandelbrot => false,
        }
    }

    /// The same region drawn as a Julia image.  A set that carried no
    /// constant is drawn with `c = 0`.
    pub fn as_julia(&self) -> ParameterSet {
        let c = match self.fractal {
            Fractal::Julia { c } => c,
            Fractal::Mandelbrot => Complex::new(0.0, 0.0),
        };
        ParameterSet {
            fractal: Fractal::Julia { c },
            ..*self
        }
    }

    /// The same region drawn as a Mandelbrot image.  Any Julia
    /// constant is ignored.
    pub fn as_mandelbrot(&self) -> ParameterSet {
        ParameterSet {
            fractal: Fractal::Mandelbrot,
            ..*self
        }
    }
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, String> {
        match self.0.next() {
            None => Err(format!("missing {}", what)),
            Some(token) => token
                .parse::<T>()
                .map_err(|_| format!("could not parse {} from {:?}", what, token)),
        }
    }
}

impl FromStr for ParameterSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let parse = || -> Result<ParameterSet, String> {
            let mut tokens = Tokens(s.split_whitespace());
            // Any nonzero flag selects Julia.
            let is_julia = tokens.next::<i64>("fractal flag")? != 0;
            let x_min = tokens.next("x_min")?;
            let x_max = tokens.next("x_max")?;
            let y_min = tokens.next("y_min")?;
            let y_max = tokens.next("y_max")?;
            let resolution = tokens.next("resolution")?;
            let iteration_cap = tokens.next("iteration cap")?;
            let fractal = if is_julia {
                Fractal::Julia {
                    c: Complex::new(
                        tokens.next("real part of c")?,
                        tokens.next("imaginary part of c")?,
                    ),
                }
            } else {
                Fractal::Mandelbrot
            };
            ParameterSet::new(
                fractal,
                (x_min, x_max),
                (y_min, y_max),
                resolution,
                iteration_cap,
            )
        };
        parse().map_err(|reason| Error::Parameters {
            origin: "<input>".to_string(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile;

    #[test]
    fn parses_a_julia_file() {
        let p: ParameterSet = "1\n-2.0 2.0 -1.5 1.5\n0.01\n150\n-0.6 0.4\n"
            .parse()
            .unwrap();
        assert!(p.is_julia());
        assert_eq!(p.fractal, Fractal::Julia { c: Complex::new(-0.6, 0.4) });
        assert_eq!((p.x_min, p.x_max, p.y_min, p.y_max), (-2.0, 2.0, -1.5, 1.5));
        assert_eq!(p.resolution, 0.01);
        assert_eq!(p.iteration_cap, 150);
    }

    #[test]
    fn mandelbrot_ignores_anything_after_the_cap() {
        let p: ParameterSet = "0 -2.5 1 -1 1 0.005 300 9 9".parse().unwrap();
        assert_eq!(p.fractal, Fractal::Mandelbrot);
        assert_eq!(p.iteration_cap, 300);
    }

    #[test]
    fn any_nonzero_flag_means_julia() {
        let p: ParameterSet = "7 -1 1 -1 1 0.5 10 0.25 0".parse().unwrap();
        assert!(p.is_julia());
    }

    #[test]
    fn forcing_the_map_keeps_the_region() {
        let m: ParameterSet = "0 -1 1 -2 2 0.5 10".parse().unwrap();
        let j = m.as_julia();
        assert_eq!(j.fractal, Fractal::Julia { c: Complex::new(0.0, 0.0) });
        assert_eq!((j.x_min, j.y_max, j.resolution, j.iteration_cap), (-1.0, 2.0, 0.5, 10));

        let j: ParameterSet = "1 -1 1 -2 2 0.5 10 0.3 -0.2".parse().unwrap();
        assert_eq!(j.as_julia(), j);
        assert_eq!(j.as_mandelbrot().fractal, Fractal::Mandelbrot);
        assert_eq!(j.as_mandelbrot().x_max, 1.0);
    }

    #[test]
    fn julia_without_constant_is_rejected() {
        let e = "1 -1 1 -1 1 0.5 10".parse::<ParameterSet>().unwrap_err();
        match e {
            Error::Parameters { reason, .. } => assert!(reason.contains("real part of c")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!("0 -1 one -1 1 0.5 10".parse::<ParameterSet>().is_err());
        assert!("0 -1 1 -1 1 0.5 -10".parse::<ParameterSet>().is_err());
        assert!("".parse::<ParameterSet>().is_err());
    }

    #[test]
    fn inverted_or_empty_regions_are_rejected() {
        assert!("0 1 -1 -1 1 0.5 10".parse::<ParameterSet>().is_err());
        assert!("0 -1 1 1 1 0.5 10".parse::<ParameterSet>().is_err());
        assert!("0 -1 1 -1 1 0 10".parse::<ParameterSet>().is_err());
        assert!("0 -1 1 -1 1 NaN 10".parse::<ParameterSet>().is_err());
    }

    #[test]
    fn load_reports_the_file_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0 -1 1 2 1 0.5 10").unwrap();
        match ParameterSet::load(file.path()) {
            Err(Error::Parameters { origin, .. }) => {
                assert_eq!(origin, file.path().display().to_string())
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn load_of_a_missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        match ParameterSet::load(dir.path().join("nope.in")) {
            Err(Error::InputFile { .. }) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
