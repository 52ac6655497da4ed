//! # hgy Init Command
//!
//! File: cli/src/commands/init.rs
//!
//! ## Overview
//!
//! `hgy init [<dir>]` turns a directory into a recipe archive: a git repository
//! with an empty `.hgy` index as its first commit.
//!
//! ## Architecture
//!
//! 1. Create the directory if it is missing (it must not be a file).
//! 2. Refuse to touch a directory that already has a repository or an index,
//!    unless it has both, in which case there is nothing to do.
//! 3. `git init`, then one transaction: write the index, stage it, commit
//!    `hgy initialized`.
//!
//! ## Usage
//!
//! ```bash
//! hgy init ~/recipes
//! hgy --dir ~/recipes init
//! ```
//!
use crate::common::fs::io;
use crate::common::vcs::{GitCli, Transaction};
use crate::core::config::Config;
use crate::core::error::{HgyError, Result};
use crate::core::store::Store;
use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Create a new recipe archive")]
pub struct InitArgs {
    /// Directory to initialize. Defaults to the archive directory (--dir, HGY_DIR, config).
    dir: Option<PathBuf>,
}

pub fn handle_init(args: InitArgs, config: &Config) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| config.archive_dir());
    info!("Handling init command (Directory: {})", dir.display());

    if dir.exists() && !dir.is_dir() {
        return Err(anyhow!(HgyError::FileSystem(format!(
            "{} already exists and is not a directory",
            dir.display()
        ))));
    }
    io::ensure_dir_exists(&dir)?;

    let git = GitCli::new(&dir);
    let store = Store::new(&dir);

    match (git.is_repository(), store.exists()) {
        (true, true) => {
            println!(
                "Info: There is already a hgy archive in '{}'. Nothing to do.",
                dir.display()
            );
            return Ok(());
        }
        (true, false) => {
            return Err(anyhow!(HgyError::FileSystem(format!(
                "There is already a git repository in '{}'",
                dir.display()
            ))));
        }
        (false, true) => {
            return Err(anyhow!(HgyError::FileSystem(format!(
                "There is already a store file in '{}'",
                dir.display()
            ))));
        }
        (false, false) => {}
    }

    git.init()?;
    Transaction::new(&git)
        .step("Writing empty index", || store.save())
        .stage(store.filename())
        .commit("hgy initialized")?;

    println!("Initialized empty hgy archive in {}", dir.display());
    Ok(())
}
