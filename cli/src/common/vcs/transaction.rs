//! # hgy Archive Transactions
//!
//! File: cli/src/common/vcs/transaction.rs
//!
//! ## Overview
//!
//! A mutating command touches several files (the record, its images, the
//! index) through operations that are not transactional on their own. A
//! `Transaction` runs those operations as named steps and turns them into a
//! single commit, or into nothing at all:
//!
//! ```text
//! Idle ──commit()──▶ Executing ──all steps ok──▶ Committed
//!                        │
//!                        └──a step fails──▶ RolledBack
//! ```
//!
//! - Steps run strictly in the order they were added; none is retried.
//! - The first failing step stops the transaction. Staged changes are then
//!   dropped with `VersionControl::unstage_all`, exactly once, and the error
//!   is returned. If dropping them fails too, the error says so
//!   (`TransactionError::RollbackFailed`) and the archive has to be inspected
//!   by hand.
//! - When every step succeeded, a commit is made only if the VCS reports
//!   pending changes. Otherwise the transaction prints an info line and ends
//!   as `Committed` without creating a commit.
//!
//! Callers propagate a `TransactionError` straight up to `main`, which
//! reports it and exits non-zero. Nothing runs after a failed transaction.
//!
use super::VersionControl;
use crate::core::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    Executing,
    Committed,
    RolledBack,
}

/// How a successful transaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// A commit was created.
    Committed,
    /// All steps ran but the working tree was unchanged, so nothing was committed.
    NoChanges,
}

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("{step} failed ({cause:#})")]
    StepFailed { step: String, cause: anyhow::Error },

    #[error(
        "Rollback after '{step}' failed ({rollback:#}). The archive is in an undefined state and needs manual inspection. Cause: {cause:#}"
    )]
    RollbackFailed {
        step: String,
        cause: anyhow::Error,
        rollback: anyhow::Error,
    },

    #[error("Transaction cannot run again (state: {0:?})")]
    AlreadyFinished(TransactionState),
}

type StepAction<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

struct Step<'a> {
    name: String,
    action: StepAction<'a>,
}

/// An ordered list of archive mutations that ends in at most one commit.
pub struct Transaction<'a> {
    vcs: &'a dyn VersionControl,
    steps: Vec<Step<'a>>,
    state: TransactionState,
    cached: bool,
}

impl fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("steps", &self.steps.iter().map(|s| &s.name).collect::<Vec<_>>())
            .field("state", &self.state)
            .field("cached", &self.cached)
            .finish()
    }
}

impl<'a> Transaction<'a> {
    pub fn new(vcs: &'a dyn VersionControl) -> Self {
        Self {
            vcs,
            steps: Vec::new(),
            state: TransactionState::Idle,
            cached: true,
        }
    }

    /// Appends a named step.
    pub fn step<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Result<()> + 'a,
    {
        self.steps.push(Step {
            name: name.into(),
            action: Box::new(action),
        });
        self
    }

    /// Appends a step that stages `path`.
    pub fn stage(self, path: impl AsRef<Path>) -> Self {
        let vcs = self.vcs;
        let path: PathBuf = path.as_ref().to_path_buf();
        self.step(format!("Staging '{}'", path.display()), move || {
            vcs.stage(&path)
        })
    }

    /// Decide whether to commit by looking at unstaged instead of staged changes.
    #[cfg(test)]
    pub fn check_unstaged(mut self) -> Self {
        self.cached = false;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Runs all steps and commits with `message` if anything changed.
    pub fn commit(&mut self, message: &str) -> std::result::Result<TransactionOutcome, TransactionError> {
        if self.state != TransactionState::Idle {
            return Err(TransactionError::AlreadyFinished(self.state));
        }
        self.state = TransactionState::Executing;
        debug!("Executing transaction with {} step(s)", self.steps.len());

        for step in std::mem::take(&mut self.steps) {
            debug!("Transaction step: {}", step.name);
            if let Err(cause) = (step.action)() {
                return Err(self.roll_back(step.name, cause));
            }
        }

        if !self.vcs.has_changes(self.cached) {
            info!("Nothing changed, skipping commit '{}'", message);
            println!("Info: No changes. Nothing to do.");
            self.state = TransactionState::Committed;
            return Ok(TransactionOutcome::NoChanges);
        }

        if let Err(cause) = self.vcs.commit(message) {
            return Err(self.roll_back(format!("Commit '{}'", message), cause));
        }

        self.state = TransactionState::Committed;
        Ok(TransactionOutcome::Committed)
    }

    fn roll_back(&mut self, step: String, cause: anyhow::Error) -> TransactionError {
        warn!("{} failed, rolling back staged changes: {:#}", step, cause);
        self.state = TransactionState::RolledBack;
        match self.vcs.unstage_all() {
            Ok(()) => TransactionError::StepFailed { step, cause },
            Err(rollback) => {
                error!("Rollback failed: {:#}", rollback);
                TransactionError::RollbackFailed {
                    step,
                    cause,
                    rollback,
                }
            }
        }
    }
}
