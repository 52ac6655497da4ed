//! # hgy Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the record code and the commands.
//!
//! - **`copy`**: Recursive directory copy via `fs_extra` (HTML export images).
//! - **`io`**: Directory creation, whole-file reads and writes, single-file
//!   copies, and the `--force` destination guard.
//!
//! Import the submodule you need, e.g. `use crate::common::fs::io;`.
//!

/// Recursive directory copying (e.g., `copy_directory_contents`).
pub mod copy;
/// Basic file I/O (e.g., `ensure_dir_exists`, `write_string_to_file`, `copy_file`).
pub mod io;
