//! Human-readable output for formatter runs.
//!
//! Per-file statuses go to stdout; diagnostics go to stderr. Colorization
//! uses `owo-colors` and is disabled when `NO_COLOR` is set.

use crate::error::Error;
use crate::run::FileReport;
use owo_colors::OwoColorize;
use std::path::Path;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Render a path relative to the current directory when possible.
pub fn display_path(path: &Path) -> String {
    pathdiff::diff_paths(path, Path::new("."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Print one line per file: formatted, unchanged, or failed.
pub fn print_reports(reports: &[FileReport]) {
    let color = use_colors();
    for report in reports {
        let path = display_path(&report.path);
        if let Some(message) = &report.error {
            if color {
                eprintln!("{} {}: {}", "error:".red().bold(), path.bold(), message);
            } else {
                eprintln!("error: {}: {}", path, message);
            }
        } else if report.changed {
            if color {
                println!("{} {}", "formatted:".green().bold(), path.bold());
            } else {
                println!("formatted: {}", path);
            }
        } else if color {
            println!("{} {}", "no changes:".bright_black(), path);
        } else {
            println!("no changes: {}", path);
        }
    }
}

/// Pre-commit gate diagnostic for the first improperly formatted file.
pub fn print_mismatch(path: &Path) {
    let message = format!(
        "File \"{}\" is not properly formatted!\n\nPlease run gmlfmt to fix formatting of all staged GML files and stage the changes before running commit again.",
        display_path(path)
    );
    if use_colors() {
        eprintln!("{} {}", "ERROR:".red().bold(), message);
    } else {
        eprintln!("ERROR: {}", message);
    }
}

pub fn print_fatal(err: &Error) {
    if use_colors() {
        eprintln!("{} {}", "error:".red().bold(), err);
    } else {
        eprintln!("error: {}", err);
    }
}
