//! gmlfmt binary entry point.
//! Resolves the invocation mode, drives the formatter, and maps outcomes to
//! the process exit status.

use clap::Parser;
use gmlfmt::canonical::Canonicalizer;
use gmlfmt::cli::{Cli, Mode};
use gmlfmt::error::Error;
use gmlfmt::run::{self, FileReport, Validation};
use gmlfmt::vcs::GitCli;
use gmlfmt::{config, output};
use std::path::Path;

fn main() {
    // Usage errors exit 1; help and version output exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    let mode = cli.mode();

    if mode == Mode::Version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Malformed config aborts before any file is touched.
    let options = match config::load_options(Path::new(config::OPTIONS_PATH)) {
        Ok(options) => options,
        Err(err) => {
            output::print_fatal(&err);
            std::process::exit(2);
        }
    };
    let canonicalizer = Canonicalizer::new(options);
    let vcs = GitCli::default();

    match mode {
        Mode::Version => {}
        Mode::Validate => match run::validate_staged(&vcs, &canonicalizer) {
            Ok(Validation::Clean { .. }) => {}
            Ok(Validation::Mismatch { path }) => {
                output::print_mismatch(&path);
                std::process::exit(1);
            }
            Err(err) => {
                output::print_fatal(&err);
                std::process::exit(2);
            }
        },
        Mode::Staged => finish(run::format_staged(&vcs, &canonicalizer)),
        Mode::All => finish(run::format_all(Path::new("."), &canonicalizer)),
        Mode::File(path) => finish(run::format_file(&path, &canonicalizer)),
    }
}

/// Print per-file reports and fail the run if any file failed.
fn finish(result: Result<Vec<FileReport>, Error>) {
    match result {
        Ok(reports) => {
            output::print_reports(&reports);
            if run::any_failed(&reports) {
                std::process::exit(1);
            }
        }
        Err(err) => {
            output::print_fatal(&err);
            std::process::exit(2);
        }
    }
}
