//! gmlfmt core library.
//!
//! Reformats GameMaker Language (`.gml`) sources to a canonical style and
//! backs the pre-commit gate that refuses commits containing non-canonical
//! files.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: `.jsbeautifyrc` loading with built-in defaults.
//! - `beautify`: the pretty-printer boundary and built-in implementation.
//! - `canonical`: beautifier pass plus the ordered sigil touch-up rules.
//! - `select`: candidate file resolution for single-file and all modes.
//! - `vcs`: staged-path and staged-blob queries against git.
//! - `run`: per-mode drivers and per-file outcome aggregation.
//! - `output`: human-readable result and diagnostic printing.
//! - `error`: the error taxonomy shared across modules.
pub mod beautify;
pub mod canonical;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod run;
pub mod select;
pub mod vcs;
