//! # hgy Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Wrappers around `std::process::Command` for the two kinds of external
//! programs hgy runs:
//!
//! - **Captured commands** (`run_command_capture`): `git` invocations whose
//!   stdout/stderr are collected so failures can be reported in full.
//! - **Interactive commands** (`open_in_editor`): the user's editor, which
//!   inherits the terminal.
//!
use crate::core::error::{HgyError, Result};
use anyhow::Context;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Runs `program` with `args` and captures its output.
///
/// A non-zero exit status is *not* an error here; callers decide what a
/// status means (e.g. `git diff --exit-code` uses 1 for "differences").
pub fn run_command_capture<I, S>(program: &str, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    debug!("Running {:?}", command);
    command
        .output()
        .with_context(|| format!("Failed to execute '{}'. Is it installed?", program))
}

/// Converts a finished `Output` into an error unless it exited successfully.
pub fn ensure_success(cmd: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(HgyError::ExternalCommand {
        cmd: cmd.to_string(),
        status: output.status.to_string(),
        output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
    .into())
}

/// Opens `path` in `editor` and waits for it to exit.
///
/// `editor` may carry arguments (e.g. `code --wait`); it is split on
/// whitespace, the first word being the program.
pub fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| HgyError::Config("Editor command is empty".to_string()))?;

    debug!("Opening {} with {}", path.display(), editor);
    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .with_context(|| format!("Running '{}' to edit {} failed", editor, path.display()))?;

    if !status.success() {
        return Err(HgyError::ExternalCommand {
            cmd: format!("{} {}", editor, path.display()),
            status: status.to_string(),
            output: String::new(),
        }
        .into());
    }
    Ok(())
}
