//! # hgy Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the command handlers, kept apart from the domain
//! model in `core`:
//!
//! - **`fs`**: Filesystem operations (`io` for single files and paths, `copy`
//!   for directory trees).
//! - **`process`**: Running external programs (`git`, the user's editor).
//! - **`vcs`**: The `VersionControl` interface, its git implementation, and the
//!   `Transaction` every mutating command commits through.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use crate::common::vcs::{GitCli, Transaction};
//!
//! io::ensure_dir_exists(&dir)?;
//! Transaction::new(&GitCli::new(&dir))
//!     .stage(".hgy")
//!     .commit("hgy initialized")?;
//! ```
//!

/// Filesystem utilities (`io`, `copy`).
pub mod fs;
/// External process execution.
pub mod process;
/// Version control and transactions.
pub mod vcs;
