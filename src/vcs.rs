//! Version-control bridge.
//!
//! Two read-only queries against git: the list of paths staged for commit,
//! and the staged (index) blob content of one path. Both shell out to the
//! `git` binary as ordinary blocking subprocess calls. The trait exists so
//! runs can be driven by an in-memory stand-in in tests.

use crate::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Vcs {
    /// Paths currently staged for commit, in git's listing order, with empty
    /// entries dropped.
    fn staged_paths(&self) -> Result<Vec<PathBuf>, Error>;

    /// Content of `path` as staged, not the working-tree content.
    fn staged_content(&self, path: &Path) -> Result<String, Error>;
}

/// `Vcs` backed by the `git` binary, run in the process working directory
/// unless a repository directory is given.
#[derive(Debug, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, Error> {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        let output = cmd
            .args(args)
            .output()
            .map_err(|e| Error::Vcs(format!("failed to run git: {e}")))?;
        if !output.status.success() {
            return Err(Error::Vcs(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for GitCli {
    fn staged_paths(&self) -> Result<Vec<PathBuf>, Error> {
        let stdout = self.run(&["diff", "--name-only", "--cached"])?;
        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    fn staged_content(&self, path: &Path) -> Result<String, Error> {
        let spec = format!(":{}", path.display());
        self.run(&["show", spec.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn git(dir: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    // Exercises the real git binary; bails out quietly when git is not
    // available in the test environment.
    #[test]
    fn test_staged_paths_and_content_against_real_repo() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }
        let dir = tempdir().unwrap();
        let root = dir.path();
        assert!(git(root, &["init", "-q"]));
        assert!(git(
            root,
            &[
                "-c",
                "user.email=t@example.com",
                "-c",
                "user.name=t",
                "commit",
                "-q",
                "--allow-empty",
                "-m",
                "init",
            ],
        ));
        fs::write(root.join("a.gml"), "x = 1;\n").unwrap();
        assert!(git(root, &["add", "a.gml"]));
        // the working tree diverges from the index; the bridge must report
        // the staged version
        fs::write(root.join("a.gml"), "x = 2;\n").unwrap();

        let vcs = GitCli::in_dir(root);
        let staged = vcs.staged_paths().unwrap();
        assert_eq!(staged, vec![PathBuf::from("a.gml")]);
        assert_eq!(vcs.staged_content(Path::new("a.gml")).unwrap(), "x = 1;\n");
    }

    #[test]
    fn test_failed_query_surfaces_vcs_error() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }
        let dir = tempdir().unwrap();
        // not a repository
        let vcs = GitCli::in_dir(dir.path());
        assert!(matches!(vcs.staged_paths(), Err(Error::Vcs(_))));
    }
}
