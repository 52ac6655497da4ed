//! # hgy Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the hgy CLI. Each submodule
//! defines a clap `...Args` struct and a `handle_...` function that `main.rs`
//! routes to.
//!
//! ## Architecture
//!
//! - Commands that change the archive (`init`, `add`, `edit`, `mv`, `rm`) end
//!   in exactly one `Transaction` and therefore in at most one git commit.
//! - Commands that only read it (`list`, `grocery`, `cook`, `plan`, `render`)
//!   go through the `Store` and never touch git.
//!
//! Every command except `init` first checks that the archive directory holds
//! both a git repository and a `.hgy` index (`open_archive`).
//!
use crate::common::vcs::GitCli;
use crate::core::config::Config;
use crate::core::error::{HgyError, Result};
use crate::core::store::Store;
use std::path::Path;
use tracing::debug;

/// `hgy add`: new recipes and additional images.
pub mod add;
/// `hgy cook`: scaled ingredients and step-by-step instructions.
pub mod cook;
/// `hgy edit`: edit a record in the editor.
pub mod edit;
/// `hgy grocery`: merged shopping list for several recipes or meal plans.
pub mod grocery;
/// `hgy init`: create a new archive.
pub mod init;
/// `hgy list`: show the recipes of the archive.
pub mod list;
/// `hgy mv`: rename a recipe.
pub mod mv;
/// `hgy plan`: random meal plans.
pub mod plan;
/// `hgy render`: static HTML export.
pub mod render;
/// `hgy rm`: delete a recipe.
pub mod rm;

/// An opened archive: its index and the repository it is committed to.
pub struct Archive {
    pub store: Store,
    pub git: GitCli,
}

/// Validates the configured archive directory and loads its index.
pub fn open_archive(config: &Config) -> Result<Archive> {
    let dir = config.archive_dir();
    check_archive(&dir)?;
    let store = Store::open(&dir)?;
    debug!("Opened archive {} ({} recipes)", dir.display(), store.len());
    Ok(Archive {
        store,
        git: GitCli::new(dir),
    })
}

fn check_archive(dir: &Path) -> Result<()> {
    let git_exists = GitCli::new(dir).is_repository();
    let index_exists = Store::new(dir).exists();

    let reason = match (git_exists, index_exists) {
        (true, true) => return Ok(()),
        (false, true) => "There is a store, but no git repository. Awkward!",
        (true, false) => "There is a git repository, but no store. Awkward!",
        (false, false) => "Neither a git repository nor a store found. Run 'hgy init' first",
    };
    Err(HgyError::NotAnArchive {
        dir: dir.display().to_string(),
        reason: reason.to_string(),
    }
    .into())
}
