//! Writes finished grids as plain-text graymaps (PGM, magic `P2`).
//!
//! Each value is followed by a single space and each row ends with a
//! newline, so the files match the reference images byte for byte.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use errors::Error;
use grid::ComputeGrid;

/// Largest intensity a cell can hold.
pub const MAX_VALUE: u8 = 255;

/// Writes the header and every row of `grid`, top row first.
pub fn write_grid<W: Write>(mut out: W, grid: &ComputeGrid) -> io::Result<()> {
    write!(out, "P2\n{} {}\n{}\n", grid.width(), grid.height(), MAX_VALUE)?;
    for row in 0..grid.height() {
        for value in grid.row(row) {
            write!(out, "{} ", value)?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Creates (or truncates) `path` and writes `grid` into it.
pub fn write_file<P: AsRef<Path>>(path: P, grid: &ComputeGrid) -> Result<(), Error> {
    let path = path.as_ref();
    let wrap = |cause| Error::OutputFile {
        path: path.display().to_string(),
        cause,
    };
    let file = File::create(path).map_err(wrap)?;
    write_grid(BufWriter::new(file), grid).map_err(wrap)
}
