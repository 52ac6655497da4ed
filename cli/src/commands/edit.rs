//! # hgy Edit Command
//!
//! File: cli/src/commands/edit.rs
//!
//! ## Overview
//!
//! `hgy edit <name>` opens a record in the editor and commits the result as
//! `Recipe changed`. Images that were removed from the record's `images` list
//! are deleted from the archive in the same commit.
//!
use crate::commands::{open_archive, Archive};
use crate::common::fs::io;
use crate::common::process;
use crate::common::vcs::Transaction;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Edit a recipe in $EDITOR")]
pub struct EditArgs {
    /// Name of the recipe to edit.
    name: String,
}

pub fn handle_edit(args: EditArgs, config: &Config) -> Result<()> {
    info!("Handling edit command (Name: {})", args.name);
    let Archive { store, git } = open_archive(config)?;
    let name = args.name.as_str();

    if !store.contains(name) {
        println!("Info: No recipe found with the name '{}'", name);
        return Ok(());
    }

    let record_path = store.recipe_path(name);
    let before = store.load_recipe(name)?;
    process::open_in_editor(&config.editor.command, &record_path)?;
    let after = store.load_recipe(name)?;

    let dropped: Vec<&String> = before
        .images
        .iter()
        .filter(|image| !after.has_image(image))
        .collect();

    let archive = store.dir();
    let mut tx = Transaction::new(&git);
    for image in dropped {
        info!("Image {} no longer referenced, removing it", image);
        tx = tx
            .step(format!("Removing image '{}'", image), move || {
                io::remove_path(&archive.join(image)).map(|_| ())
            })
            .stage(image);
    }
    tx.stage(name).commit("Recipe changed")?;
    Ok(())
}
