// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The orchestrator.  A fixed number of worker threads render a list
//! of images in order.  For each image every worker
//!
//! 1. computes its own share of the columns,
//! 2. waits at that image's barrier until every worker has finished
//!    computing, and
//! 3. mirrors its own share of the row pairs.
//!
//! Workers then move straight on to the next image.  No barrier is
//! needed between images: a worker finishes one image's mirror before
//! it starts the next image's columns, and the next image's barrier
//! keeps everyone's mirror of that image behind everyone's compute.

use crossbeam;
use crossbeam::channel;
use std::sync::Barrier;

use errors::Error;
use flip::flip_rows;
use grid::ComputeGrid;
use kernel::compute_columns;
use params::ParameterSet;
use partition::partition;

/// One image as the workers see it: what to draw, where to draw it,
/// and the rendezvous separating its compute phase from its flip.
struct ImageJob<'a> {
    params: &'a ParameterSet,
    grid: &'a ComputeGrid,
    barrier: Barrier,
}

impl<'a> ImageJob<'a> {
    // A worker that dies before the barrier leaves the others waiting
    // there for good; there is no cancellation.
    fn run(&self, id: usize, workers: usize) {
        compute_columns(self.params, self.grid, partition(id, workers, self.grid.width()));
        self.barrier.wait();
        flip_rows(self.grid, partition(id, workers, self.grid.height() / 2));
    }
}

/// Everything a single worker needs.  Built per worker at spawn time
/// and never changed afterwards.
struct WorkerContext<'a> {
    id: usize,
    workers: usize,
    jobs: &'a [ImageJob<'a>],
}

impl<'a> WorkerContext<'a> {
    fn run(&self) {
        for job in self.jobs {
            job.run(self.id, self.workers);
        }
    }
}

/// Renders images with a fixed number of worker threads.
#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    workers: usize,
}

impl Renderer {
    /// A renderer that uses exactly `workers` threads per run.
    pub fn new(workers: usize) -> Result<Renderer, Error> {
        if workers == 0 {
            return Err(Error::Configuration(
                "at least one worker thread is required".to_string(),
            ));
        }
        Ok(Renderer { workers })
    }

    /// Number of worker threads per run.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Renders every image, in order, and returns the finished grids
    /// in screen orientation.  All grids are allocated before any
    /// thread starts; nothing is returned unless every worker finished.
    pub fn render(&self, images: &[ParameterSet]) -> Result<Vec<ComputeGrid>, Error> {
        let grids = images
            .iter()
            .map(ComputeGrid::for_params)
            .collect::<Result<Vec<ComputeGrid>, Error>>()?;
        self.run_images(images, &grids)?;
        Ok(grids)
    }

    /// Renders the Julia slot and then the Mandelbrot slot.  Each slot
    /// always draws its own map: the Julia slot uses the set's constant
    /// (zero if it has none) and the Mandelbrot slot ignores any.
    pub fn render_pair(
        &self,
        julia: &ParameterSet,
        mandelbrot: &ParameterSet,
    ) -> Result<(ComputeGrid, ComputeGrid), Error> {
        let images = [julia.as_julia(), mandelbrot.as_mandelbrot()];
        let grids = [
            ComputeGrid::for_params(&images[0])?,
            ComputeGrid::for_params(&images[1])?,
        ];
        self.run_images(&images, &grids)?;
        let [julia_grid, mandelbrot_grid] = grids;
        Ok((julia_grid, mandelbrot_grid))
    }

    fn run_images(&self, images: &[ParameterSet], grids: &[ComputeGrid]) -> Result<(), Error> {
        let workers = self.workers;
        let jobs: Vec<ImageJob> = images
            .iter()
            .zip(grids.iter())
            .map(|(params, grid)| ImageJob {
                params,
                grid,
                barrier: Barrier::new(workers),
            })
            .collect();
        let jobs = &jobs[..];
        self.run_workers(|id| WorkerContext { id, workers, jobs }.run())
    }

    /// Runs `work` once on each of the workers, passing the worker id.
    fn run_workers<F>(&self, work: F) -> Result<(), Error>
    where
        F: Fn(usize) + Sync,
    {
        let workers = self.workers;
        let work = &work;
        let outcome = crossbeam::scope(|scope| -> Result<(), Error> {
            // Workers hold at the gate until every one of them exists,
            // so a failed spawn never leaves anybody stuck at a barrier.
            let (launch, gate) = channel::bounded::<()>(workers);
            let mut handles = Vec::with_capacity(workers);

            for id in 0..workers {
                let gate = gate.clone();
                let spawned = scope
                    .builder()
                    .name(format!("worker-{}", id))
                    .spawn(move |_| {
                        if gate.recv().is_ok() {
                            work(id);
                        }
                    });
                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(cause) => {
                        drop(launch);
                        for (_, handle) in handles {
                            let _ = handle.join();
                        }
                        return Err(Error::Spawn { worker: id, cause });
                    }
                }
            }
            drop(gate);

            for &(id, _) in &handles {
                if launch.send(()).is_err() {
                    return Err(Error::WorkerPanicked { worker: id });
                }
            }

            let mut failed = None;
            for (id, handle) in handles {
                if handle.join().is_err() && failed.is_none() {
                    failed = Some(id);
                }
            }
            match failed {
                Some(worker) => Err(Error::WorkerPanicked { worker }),
                None => Ok(()),
            }
        });
        outcome.unwrap_or_else(|_| Err(Error::ThreadScope))
    }
}
