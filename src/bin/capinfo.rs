//! CLI entry point: flag parsing, backend selection, stream wiring.
//!
//! The report goes to stdout, every diagnostic (usage text, query failures,
//! truncation advisories) to stderr. Exit status is 0 on success and 1 for
//! usage, for a missing backend, or for a fatal platform-enumeration error.

use anyhow::Result;
use capinfo::report::Sink;
use capinfo::walker::WalkOptions;
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_args();
    let mut out = String::new();
    let mut diag = String::new();
    let result = {
        let mut sink = Sink {
            out: &mut out,
            diag: &mut diag,
        };
        walk_with_backend(options, &mut sink)
    };
    // Flush whatever was composed before a fatal error, then propagate it.
    print!("{out}");
    eprint!("{diag}");
    result
}

fn parse_args() -> WalkOptions {
    let mut options = WalkOptions::default();
    let mut args = env::args_os();
    let program = args
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "capinfo".to_string());

    for arg in args {
        match arg.to_str() {
            Some("-i") | Some("--image-formats") => options.image_formats = true,
            // -h, --help, and anything unrecognized all print usage and
            // exit 1, matching the documented CLI contract.
            _ => usage(&program),
        }
    }
    options
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {program} [options]\nOptions:\n  -h, --help                This message\n  -i, --image-formats       Print image formats for each device"
    );
    std::process::exit(1);
}

#[cfg(feature = "opencl")]
fn walk_with_backend(options: WalkOptions, sink: &mut Sink<'_>) -> Result<()> {
    capinfo::walker::walk(&capinfo::opencl::OpenClProvider, options, sink)
}

#[cfg(not(feature = "opencl"))]
fn walk_with_backend(_options: WalkOptions, _sink: &mut Sink<'_>) -> Result<()> {
    anyhow::bail!("no capability backend compiled in; rebuild with --features opencl")
}
