//! Candidate file resolution.
//!
//! Resolves the single-file and all-files modes into a concrete, ordered
//! list of paths. Traversal is read-only and deterministic: entries are
//! visited in lexicographic order so repeated runs over the same tree see
//! the same sequence.

use crate::error::Error;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The one recognized source extension.
pub const GML_EXTENSION: &str = "gml";

pub fn is_gml(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == GML_EXTENSION)
}

/// Single-file mode: exactly the given path. The extension is deliberately
/// not checked; the caller picked the file.
pub fn single(path: &Path) -> Result<Vec<PathBuf>, Error> {
    if !path.is_file() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    Ok(vec![path.to_path_buf()])
}

/// All-mode: every `.gml` file under `root`, in stable walk order. The
/// `.git` directory is skipped.
pub fn all(root: &Path) -> Result<Vec<PathBuf>, Error> {
    if !root.is_dir() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");
    for entry in walker {
        let entry = entry.map_err(|e| Error::Io {
            path: root.to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && is_gml(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
