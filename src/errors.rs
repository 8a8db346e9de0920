// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong during a run.  The library never
//! terminates the process itself; the binary decides what each error
//! means for the exit code.

use std::io;

/// Errors produced while loading parameters, rendering, or writing
/// the finished grids.
#[derive(Debug, Fail)]
pub enum Error {
    /// The run was configured in a way that cannot work, such as zero
    /// worker threads.
    #[fail(display = "invalid configuration: {}", _0)]
    Configuration(String),

    /// A parameter file could not be opened or read.
    #[fail(display = "could not read parameter file {}: {}", path, cause)]
    InputFile {
        /// The file we tried to read.
        path: String,
        /// The underlying I/O failure.
        #[cause]
        cause: io::Error,
    },

    /// A parameter file was readable, but its contents made no sense.
    #[fail(display = "bad parameters in {}: {}", origin, reason)]
    Parameters {
        /// Where the parameters came from.
        origin: String,
        /// What was wrong with them.
        reason: String,
    },

    /// A grid was too large to allocate.
    #[fail(display = "could not allocate a {}x{} grid", width, height)]
    Allocation {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The operating system refused to start a worker thread.
    #[fail(display = "could not start worker {}: {}", worker, cause)]
    Spawn {
        /// Id of the worker that failed to start.
        worker: usize,
        /// The underlying I/O failure.
        #[cause]
        cause: io::Error,
    },

    /// A worker thread panicked and was seen dead at join.  A worker
    /// that dies before its barrier leaves the others waiting there,
    /// so this is only ever reported for deaths after the last barrier.
    #[fail(display = "worker {} did not finish", worker)]
    WorkerPanicked {
        /// Id of the worker that could not be joined.
        worker: usize,
    },

    /// The worker scope itself ended abnormally.
    #[fail(display = "the worker threads ended abnormally")]
    ThreadScope,

    /// An output image could not be written.
    #[fail(display = "could not write output file {}: {}", path, cause)]
    OutputFile {
        /// The file we tried to write.
        path: String,
        /// The underlying I/O failure.
        #[cause]
        cause: io::Error,
    },
}

impl Error {
    /// The process exit code for a run that stops on this error.
    /// Thread lifecycle failures keep their own code, 255, so they can
    /// be told apart from bad input.
    pub fn exit_code(&self) -> i32 {
        match *self {
            Error::Spawn { .. } | Error::WorkerPanicked { .. } | Error::ThreadScope => 255,
            _ => 1,
        }
    }

    /// Whether the run must stop.  Only output failures are survivable:
    /// the other image may still be written.
    pub fn is_fatal(&self) -> bool {
        match *self {
            Error::OutputFile { .. } => false,
            _ => true,
        }
    }
}
