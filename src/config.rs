//! Beautifier option loading.
//!
//! Options come from an optional `.jsbeautifyrc` at the repository root: a
//! flat JSON object mapping option names to values. A missing file means the
//! built-in defaults; a file that exists but is not valid JSON is a fatal
//! error, so a user's typo is never masked by a silent fallback.
//!
//! Defaults:
//! - `indent_size`: 4, `indent_char`: `" "`
//! - `preserve_newlines`: true, `max_preserve_newlines`: 2
//! - `brace_style`: `"collapse"`
//! - `end_with_newline`: true

use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Well-known config location, relative to the invocation directory.
pub const OPTIONS_PATH: &str = ".jsbeautifyrc";

/// Placement of opening braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BraceStyle {
    /// Join a lone `{` onto the end of the preceding statement line.
    Collapse,
    /// Leave opening braces where the author put them.
    Expand,
}

/// Style options passed through to the pretty-printer. Immutable after load.
#[derive(Debug, Clone, Deserialize)]
pub struct BeautifyOptions {
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,
    #[serde(default = "default_indent_char")]
    pub indent_char: String,
    #[serde(default = "default_preserve_newlines")]
    pub preserve_newlines: bool,
    /// Longest run of consecutive blank lines kept between statements.
    #[serde(default = "default_max_preserve_newlines")]
    pub max_preserve_newlines: usize,
    #[serde(default = "default_brace_style")]
    pub brace_style: BraceStyle,
    #[serde(default = "default_end_with_newline")]
    pub end_with_newline: bool,
}

fn default_indent_size() -> usize {
    4
}

fn default_indent_char() -> String {
    " ".to_string()
}

fn default_preserve_newlines() -> bool {
    true
}

fn default_max_preserve_newlines() -> usize {
    2
}

fn default_brace_style() -> BraceStyle {
    BraceStyle::Collapse
}

fn default_end_with_newline() -> bool {
    true
}

impl Default for BeautifyOptions {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            indent_char: default_indent_char(),
            preserve_newlines: default_preserve_newlines(),
            max_preserve_newlines: default_max_preserve_newlines(),
            brace_style: default_brace_style(),
            end_with_newline: default_end_with_newline(),
        }
    }
}

/// Load options from `path`, or the built-in defaults when it does not exist.
///
/// Unknown option names are ignored; a value of the wrong shape or a file
/// that is not valid JSON fails with `Error::ConfigParse`.
pub fn load_options(path: &Path) -> Result<BeautifyOptions, Error> {
    if !path.exists() {
        return Ok(BeautifyOptions::default());
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}
