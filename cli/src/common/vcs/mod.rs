//! # hgy Version Control (`common::vcs`)
//!
//! File: cli/src/common/vcs/mod.rs
//!
//! ## Overview
//!
//! Every change to the archive ends up as a commit. This module defines the
//! narrow interface the rest of hgy needs from a version-control system and
//! the transaction that groups several changes into one commit.
//!
//! - **`VersionControl`**: the four operations the transaction relies on.
//! - **`git`**: `GitCli`, the implementation that shells out to `git`.
//! - **`transaction`**: `Transaction`, ordered steps with rollback on failure
//!   and a commit only when something actually changed.
//!
//! ## Usage
//!
//! ```rust
//! let git = GitCli::new(store.dir());
//! Transaction::new(&git)
//!     .step("save index", || store.save())
//!     .stage(store.filename())
//!     .stage(&name)
//!     .commit("New recipe added")?;
//! ```
//!
use crate::core::error::Result;
use std::path::Path;

pub mod git;
pub mod transaction;

pub use git::GitCli;
pub use transaction::{Transaction, TransactionError};

/// The version-control operations a `Transaction` depends on.
///
/// Paths are relative to the repository's working tree.
pub trait VersionControl {
    /// Records the current state of `path` (new, modified, or deleted) in the staging area.
    fn stage(&self, path: &Path) -> Result<()>;

    /// Drops everything staged since the last commit. Working-tree files are untouched.
    fn unstage_all(&self) -> Result<()>;

    /// Whether there are pending changes: staged ones if `cached`, otherwise
    /// unstaged ones. Implementations answer `true` when they cannot tell.
    fn has_changes(&self, cached: bool) -> bool;

    /// Commits the staged changes with `message`.
    fn commit(&self, message: &str) -> Result<()>;
}
