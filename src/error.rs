//! Error taxonomy for one formatter invocation.

use crate::beautify::BeautifyError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed `.jsbeautifyrc`. Fatal before any file is touched; a broken
    /// config must never silently fall back to defaults.
    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Missing file or root argument. Fatal for the invocation.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A git query failed. Staged and validate runs cannot proceed without a
    /// trustworthy candidate set or comparison baseline.
    #[error("git: {0}")]
    Vcs(String),

    /// The pretty-printer rejected a file's content. Reported per file in
    /// write modes; the file is left unmodified on disk.
    #[error("{}: {source}", .path.display())]
    Format {
        path: PathBuf,
        source: BeautifyError,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
