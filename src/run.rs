//! Mode drivers.
//!
//! Each driver resolves its candidate set, canonicalizes files strictly in
//! order, and reports per-file outcomes. Write modes are fail-soft per file:
//! one malformed file never blocks formatting the rest, but it does fail the
//! run overall. Validation never writes and stops at the first mismatch.

use crate::canonical::Canonicalizer;
use crate::error::Error;
use crate::select;
use crate::vcs::Vcs;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome for one file in a write mode.
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub error: Option<String>,
}

/// Outcome of `--validate` across the staged set.
pub enum Validation {
    Clean { checked: usize },
    /// First staged file whose content differs from its canonical form.
    /// Later staged files are left unexamined.
    Mismatch { path: PathBuf },
}

pub fn format_file(path: &Path, canonicalizer: &Canonicalizer) -> Result<Vec<FileReport>, Error> {
    Ok(format_paths(&select::single(path)?, canonicalizer))
}

pub fn format_all(root: &Path, canonicalizer: &Canonicalizer) -> Result<Vec<FileReport>, Error> {
    Ok(format_paths(&select::all(root)?, canonicalizer))
}

pub fn format_staged(
    vcs: &dyn Vcs,
    canonicalizer: &Canonicalizer,
) -> Result<Vec<FileReport>, Error> {
    let staged: Vec<PathBuf> = vcs
        .staged_paths()?
        .into_iter()
        .filter(|path| select::is_gml(path))
        .collect();
    Ok(format_paths(&staged, canonicalizer))
}

/// Canonicalize every path in order, overwriting files whose content
/// changes. A failing file is reported and left untouched on disk.
pub fn format_paths(paths: &[PathBuf], canonicalizer: &Canonicalizer) -> Vec<FileReport> {
    paths
        .iter()
        .map(|path| format_one(path, canonicalizer))
        .collect()
}

fn format_one(path: &Path, canonicalizer: &Canonicalizer) -> FileReport {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return failed(path, e.to_string()),
    };
    let canonical = match canonicalizer.canonicalize(&source) {
        Ok(text) => text,
        Err(e) => return failed(path, e.to_string()),
    };
    if canonical == source {
        return FileReport {
            path: path.to_path_buf(),
            changed: false,
            error: None,
        };
    }
    match fs::write(path, &canonical) {
        Ok(()) => FileReport {
            path: path.to_path_buf(),
            changed: true,
            error: None,
        },
        Err(e) => failed(path, e.to_string()),
    }
}

fn failed(path: &Path, message: String) -> FileReport {
    FileReport {
        path: path.to_path_buf(),
        changed: false,
        error: Some(message),
    }
}

/// Compare every staged `.gml` file's staged blob against its canonical
/// form, byte for byte. Short-circuits on the first mismatch; touches
/// nothing on disk.
pub fn validate_staged(
    vcs: &dyn Vcs,
    canonicalizer: &Canonicalizer,
) -> Result<Validation, Error> {
    let mut checked = 0;
    for path in vcs.staged_paths()? {
        if !select::is_gml(&path) {
            continue;
        }
        let staged = vcs.staged_content(&path)?;
        let canonical = canonicalizer
            .canonicalize(&staged)
            .map_err(|e| Error::Format {
                path: path.clone(),
                source: e,
            })?;
        if canonical != staged {
            return Ok(Validation::Mismatch { path });
        }
        checked += 1;
    }
    Ok(Validation::Clean { checked })
}

pub fn any_failed(reports: &[FileReport]) -> bool {
    reports.iter().any(|r| r.error.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BeautifyOptions;
    use std::collections::HashMap;
    use tempfile::tempdir;

    struct FakeVcs {
        staged: Vec<PathBuf>,
        blobs: HashMap<PathBuf, String>,
    }

    impl Vcs for FakeVcs {
        fn staged_paths(&self) -> Result<Vec<PathBuf>, Error> {
            Ok(self.staged.clone())
        }

        fn staged_content(&self, path: &Path) -> Result<String, Error> {
            self.blobs
                .get(path)
                .cloned()
                .ok_or_else(|| Error::Vcs(format!("no staged blob for {}", path.display())))
        }
    }

    fn canon() -> Canonicalizer {
        Canonicalizer::new(BeautifyOptions::default())
    }

    #[test]
    fn test_format_staged_fail_soft_keeps_going() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.gml");
        let bad = dir.path().join("bad.gml");
        fs::write(&good, "if (x)\n{\ny = 1;\n}\n").unwrap();
        fs::write(&bad, "}\n").unwrap();
        let vcs = FakeVcs {
            staged: vec![good.clone(), bad.clone()],
            blobs: HashMap::new(),
        };

        let reports = format_staged(&vcs, &canon()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(any_failed(&reports));
        // the good file is still rewritten canonically
        assert_eq!(
            fs::read_to_string(&good).unwrap(),
            "if (x) {\n    y = 1;\n}\n"
        );
        assert!(reports[0].changed && reports[0].error.is_none());
        // the malformed file is reported and left exactly as it was
        assert_eq!(fs::read_to_string(&bad).unwrap(), "}\n");
        assert!(!reports[1].changed && reports[1].error.is_some());
    }

    #[test]
    fn test_format_staged_ignores_other_extensions() {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "  keep me  \n").unwrap();
        let vcs = FakeVcs {
            staged: vec![notes.clone()],
            blobs: HashMap::new(),
        };
        let reports = format_staged(&vcs, &canon()).unwrap();
        assert!(reports.is_empty());
        assert_eq!(fs::read_to_string(&notes).unwrap(), "  keep me  \n");
    }

    #[test]
    fn test_unchanged_file_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.gml");
        fs::write(&path, "x = 1;\n").unwrap();
        let reports = format_paths(&[path.clone()], &canon());
        assert!(!reports[0].changed);
        assert!(reports[0].error.is_none());
    }

    #[test]
    fn test_validate_clean_when_all_staged_canonical() {
        let path = PathBuf::from("scripts/a.gml");
        let vcs = FakeVcs {
            staged: vec![path.clone(), PathBuf::from("readme.txt")],
            blobs: HashMap::from([(path, "x = 1;\n".to_string())]),
        };
        match validate_staged(&vcs, &canon()).unwrap() {
            Validation::Clean { checked } => assert_eq!(checked, 1),
            Validation::Mismatch { path } => panic!("unexpected mismatch: {}", path.display()),
        }
    }

    #[test]
    fn test_validate_reports_first_mismatch() {
        // note: validation reads staged blobs only; neither path exists on
        // disk, which also proves nothing is written
        let path = PathBuf::from("scripts/messy.gml");
        let vcs = FakeVcs {
            staged: vec![path.clone()],
            blobs: HashMap::from([(path.clone(), "  x = 1;\n".to_string())]),
        };
        match validate_staged(&vcs, &canon()).unwrap() {
            Validation::Mismatch { path: p } => assert_eq!(p, path),
            Validation::Clean { .. } => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_validate_short_circuits_after_first_mismatch() {
        let first = PathBuf::from("a.gml");
        let second = PathBuf::from("b.gml");
        // b.gml has no blob; fetching it would fail, so a Mismatch result
        // proves b.gml was never examined
        let vcs = FakeVcs {
            staged: vec![first.clone(), second],
            blobs: HashMap::from([(first.clone(), "  x = 1;\n".to_string())]),
        };
        match validate_staged(&vcs, &canon()).unwrap() {
            Validation::Mismatch { path } => assert_eq!(path, first),
            Validation::Clean { .. } => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_validate_missing_blob_is_fatal() {
        let vcs = FakeVcs {
            staged: vec![PathBuf::from("a.gml")],
            blobs: HashMap::new(),
        };
        assert!(matches!(
            validate_staged(&vcs, &canon()),
            Err(Error::Vcs(_))
        ));
    }

    #[test]
    fn test_format_file_missing_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.gml");
        assert!(matches!(
            format_file(&missing, &canon()),
            Err(Error::PathNotFound(_))
        ));
    }

    #[test]
    fn test_format_all_touches_only_gml_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.gml"), "  x = 1;\n").unwrap();
        fs::write(dir.path().join("b.txt"), "  leave me\n").unwrap();
        fs::write(dir.path().join("sub/c.gml"), "y = 2;\n").unwrap();

        let reports = format_all(dir.path(), &canon()).unwrap();
        let paths: Vec<_> = reports.iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec![dir.path().join("a.gml"), dir.path().join("sub/c.gml")]
        );
        assert!(reports[0].changed);
        assert!(!reports[1].changed);
        assert_eq!(
            fs::read_to_string(dir.path().join("a.gml")).unwrap(),
            "x = 1;\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("b.txt")).unwrap(),
            "  leave me\n"
        );
    }
}
