extern crate clap;
extern crate escapebrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use escapebrot::{pgm, ComputeGrid, Error, ParameterSet, Renderer};
use std::process;
use std::str::FromStr;
use std::time::Instant;

const JULIA_IN: &str = "julia_in";
const JULIA_OUT: &str = "julia_out";
const MANDELBROT_IN: &str = "mandelbrot_in";
const MANDELBROT_OUT: &str = "mandelbrot_out";
const THREADS: &str = "threads";
const VERBOSE: &str = "verbose";

/// Any positive count is accepted, and "auto" means one worker per CPU.
fn parse_threads(s: &str) -> Option<usize> {
    if s == "auto" {
        return Some(num_cpus::get());
    }
    match usize::from_str(s) {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

fn validate_threads(s: &str) -> Result<(), String> {
    match parse_threads(s) {
        Some(_) => Ok(()),
        None => Err("Thread count must be a positive integer or \"auto\"".to_string()),
    }
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("escapebrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders a Julia image and a Mandelbrot image as plain PGM files")
        .arg(
            Arg::with_name(JULIA_IN)
                .required(true)
                .index(1)
                .help("Parameter file for the Julia image"),
        )
        .arg(
            Arg::with_name(JULIA_OUT)
                .required(true)
                .index(2)
                .help("Output file for the Julia image"),
        )
        .arg(
            Arg::with_name(MANDELBROT_IN)
                .required(true)
                .index(3)
                .help("Parameter file for the Mandelbrot image"),
        )
        .arg(
            Arg::with_name(MANDELBROT_OUT)
                .required(true)
                .index(4)
                .help("Output file for the Mandelbrot image"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(true)
                .index(5)
                .validator(|s| validate_threads(&s))
                .help("Number of worker threads, or \"auto\""),
        )
        .arg(
            Arg::with_name(VERBOSE)
                .long(VERBOSE)
                .short("v")
                .help("Report image sizes and render time on stderr"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| Error::Configuration(format!("missing argument {}", name)))
}

fn report(error: &Error) {
    eprintln!("escapebrot: {}", error);
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let verbose = matches.is_present(VERBOSE);
    let threads = value(matches, THREADS)?;
    let threads = parse_threads(threads)
        .ok_or_else(|| Error::Configuration(format!("bad thread count {:?}", threads)))?;

    let julia = ParameterSet::load(value(matches, JULIA_IN)?)?;
    let mandelbrot = ParameterSet::load(value(matches, MANDELBROT_IN)?)?;

    let renderer = Renderer::new(threads)?;
    let started = Instant::now();
    let (julia_grid, mandelbrot_grid) = renderer.render_pair(&julia, &mandelbrot)?;
    if verbose {
        let elapsed = started.elapsed();
        eprintln!(
            "rendered julia {}x{} and mandelbrot {}x{} with {} workers in {}.{:03}s",
            julia_grid.width(),
            julia_grid.height(),
            mandelbrot_grid.width(),
            mandelbrot_grid.height(),
            renderer.workers(),
            elapsed.as_secs(),
            elapsed.subsec_millis()
        );
    }

    let outputs: [(&str, &ComputeGrid); 2] = [
        (value(matches, JULIA_OUT)?, &julia_grid),
        (value(matches, MANDELBROT_OUT)?, &mandelbrot_grid),
    ];
    for &(path, grid) in &outputs {
        if let Err(e) = pgm::write_file(path, grid) {
            if e.is_fatal() {
                return Err(e);
            }
            report(&e);
        }
    }
    Ok(())
}

fn main() {
    let matches = args();
    if let Err(e) = run(&matches) {
        report(&e);
        process::exit(e.exit_code());
    }
}
