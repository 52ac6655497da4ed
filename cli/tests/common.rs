//! # hgy CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test gets its
//! own temporary archive; the `hgy` process is isolated from the user's
//! configuration and from the global git configuration, and git identity is
//! provided through the environment so commits work on any machine.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get hgy Command (`hgy_cmd`)
///
/// An `assert_cmd::Command` for the compiled `hgy` binary.
///
/// ## Panics
/// Panics if the `hgy` binary cannot be found via `Command::cargo_bin`.
pub fn hgy_cmd() -> Command {
    Command::cargo_bin("hgy").expect("Failed to find hgy binary for testing")
}

/// Whether a usable `git` binary is installed. Tests that need one return
/// early without it.
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// A temporary directory holding an archive directory (`archive/`) and room
/// for files outside of it.
pub struct TestArchive {
    pub temp: TempDir,
}

impl TestArchive {
    /// Creates the temporary directory. The archive itself is not initialized.
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Creates and initializes the archive with `hgy init`.
    pub fn init() -> Self {
        let archive = Self::new();
        archive.hgy().arg("init").assert().success();
        archive
    }

    pub fn dir(&self) -> PathBuf {
        self.temp.path().join("archive")
    }

    /// A path outside of the archive.
    pub fn outside(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    /// `hgy` pointed at this archive, with an isolated environment.
    pub fn hgy(&self) -> Command {
        let mut cmd = hgy_cmd();
        cmd.env("HGY_DIR", self.dir())
            .env("HGY_CONFIG", self.outside("no-config.toml"))
            .env("EDITOR", "true")
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "hgy test")
            .env("GIT_AUTHOR_EMAIL", "hgy@example.invalid")
            .env("GIT_COMMITTER_NAME", "hgy test")
            .env("GIT_COMMITTER_EMAIL", "hgy@example.invalid")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Writes `content` to `path` (relative to the temp dir), creating parents.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full = self.temp.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&full, content).expect("Failed to write test file");
        full
    }

    /// Commit subjects of the archive, newest first.
    pub fn log(&self) -> Vec<String> {
        git_lines(&self.dir(), &["log", "--format=%s"])
    }

    /// Runs `git` in the archive and returns its output lines. Panics unless it succeeds.
    pub fn git(&self, args: &[&str]) -> Vec<String> {
        git_lines(&self.dir(), args)
    }

    /// Files tracked by git in the archive, sorted.
    pub fn tracked(&self) -> Vec<String> {
        let mut files = git_lines(&self.dir(), &["ls-files"]);
        files.sort();
        files
    }
}

fn git_lines(dir: &Path, args: &[&str]) -> Vec<String> {
    let output = std::process::Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "hgy test")
        .env("GIT_AUTHOR_EMAIL", "hgy@example.invalid")
        .env("GIT_COMMITTER_NAME", "hgy test")
        .env("GIT_COMMITTER_EMAIL", "hgy@example.invalid")
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
