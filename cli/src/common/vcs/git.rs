//! # hgy Git Adapter
//!
//! File: cli/src/common/vcs/git.rs
//!
//! ## Overview
//!
//! `GitCli` implements `VersionControl` by running the `git` binary. Every
//! invocation is pinned to the archive:
//!
//! ```text
//! git -C <archive> --git-dir=.git --work-tree=. <command> <args...>
//! ```
//!
//! so that a surrounding repository (or `GIT_DIR` in the environment) never
//! receives hgy's commits.
//!
use super::VersionControl;
use crate::common::process;
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Output;
use tracing::{debug, info};

/// A git working tree driven through the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn invoke<I, S>(&self, command: &str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut full_args: Vec<OsString> = vec![
            "-C".into(),
            self.dir.as_os_str().to_owned(),
            "--git-dir=.git".into(),
            "--work-tree=.".into(),
            command.into(),
        ];
        full_args.extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        process::run_command_capture("git", &full_args)
    }

    /// Runs a git command and fails unless it exits successfully.
    fn exec<I, S>(&self, command: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.invoke(command, args)?;
        process::ensure_success(&format!("git {}", command), &output).with_context(|| {
            format!("Git command '{}' failed in '{}'", command, self.dir.display())
        })
    }

    /// Whether the archive directory is (inside) a git working tree.
    pub fn is_repository(&self) -> bool {
        self.exec("status", ["--porcelain"]).is_ok()
    }

    pub fn init(&self) -> Result<()> {
        self.exec("init", ["--quiet"])?;
        info!("Initialized git repository in {}", self.dir.display());
        Ok(())
    }
}

impl VersionControl for GitCli {
    fn stage(&self, path: &Path) -> Result<()> {
        debug!("git add -A {}", path.display());
        self.exec("add", [OsStr::new("-A"), OsStr::new("--"), path.as_os_str()])
    }

    fn unstage_all(&self) -> Result<()> {
        self.exec("reset", ["--quiet"])
    }

    fn has_changes(&self, cached: bool) -> bool {
        let args: &[&str] = if cached {
            &["--quiet", "--exit-code", "--cached"]
        } else {
            &["--quiet", "--exit-code"]
        };
        // Exit code 0 means "no differences"; anything else, including a
        // failure to run git at all, counts as pending changes.
        match self.invoke("diff", args) {
            Ok(output) => !output.status.success(),
            Err(e) => {
                debug!("git diff failed, assuming changes: {:#}", e);
                true
            }
        }
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.exec("commit", ["--quiet", "-m", message])?;
        info!("Committed: {}", message);
        Ok(())
    }
}

// --- Unit Tests ---
// These run the real `git` binary and skip themselves when it is missing.
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn git_available() -> bool {
        process::run_command_capture("git", ["--version"]).is_ok_and(|o| o.status.success())
    }

    fn configured_repo(dir: &Path) -> Result<GitCli> {
        let git = GitCli::new(dir);
        git.init()?;
        git.exec("config", ["user.name", "hgy test"])?;
        git.exec("config", ["user.email", "hgy@example.invalid"])?;
        git.exec("config", ["commit.gpgsign", "false"])?;
        Ok(git)
    }

    #[test]
    fn test_stage_commit_and_changes() -> Result<()> {
        if !git_available() {
            return Ok(());
        }
        let dir = tempdir()?;
        let git = configured_repo(dir.path())?;
        assert!(git.is_repository());

        fs::write(dir.path().join("pizza"), "name: Pizza\n")?;
        assert!(!git.has_changes(true));
        git.stage(Path::new("pizza"))?;
        assert!(git.has_changes(true));
        git.commit("New recipe added")?;
        assert!(!git.has_changes(true));
        assert!(!git.has_changes(false));

        fs::remove_file(dir.path().join("pizza"))?;
        assert!(git.has_changes(false));
        git.stage(Path::new("pizza"))?;
        assert!(git.has_changes(true));
        git.unstage_all()?;
        assert!(!git.has_changes(true));
        Ok(())
    }

    #[test]
    fn test_not_a_repository() -> Result<()> {
        if !git_available() {
            return Ok(());
        }
        let dir = tempdir()?;
        let git = GitCli::new(dir.path().join("missing"));
        assert!(!git.is_repository());
        assert!(git.stage(Path::new("x")).is_err());
        Ok(())
    }
}
