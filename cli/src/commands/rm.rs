//! # hgy Remove Command
//!
//! File: cli/src/commands/rm.rs
//!
//! ## Overview
//!
//! `hgy rm <name>` deletes a recipe: its index entry, its images, and the
//! record file, committed together as `Recipe removed`. Unknown names are
//! reported and leave the archive untouched.
//!
use crate::commands::{open_archive, Archive};
use crate::common::fs::io;
use crate::common::vcs::Transaction;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Remove a recipe and its images")]
pub struct RmArgs {
    /// Name of the recipe to remove.
    name: String,
}

pub fn handle_rm(args: RmArgs, config: &Config) -> Result<()> {
    info!("Handling rm command (Name: {})", args.name);
    let Archive { mut store, git } = open_archive(config)?;
    let name = args.name.as_str();

    if !store.contains(name) {
        println!("Info: No recipe found with the name '{}'", name);
        return Ok(());
    }

    let recipe = store.load_recipe(name)?;
    store.remove(name);

    let archive = store.dir();
    let record_path = store.recipe_path(name);
    let image_dir = archive.join(store.image_dir(name));

    let mut tx = Transaction::new(&git).step("Saving index", || store.save());
    for image in &recipe.images {
        tx = tx
            .step(format!("Removing image '{}'", image), move || {
                io::remove_path(&archive.join(image)).map(|_| ())
            })
            .stage(image);
    }
    tx.step("Removing record", || io::remove_path(&record_path).map(|_| ()))
        .stage(name)
        .stage(store.filename())
        // Leftovers that were never committed.
        .step("Removing image directory", || {
            io::remove_path(&image_dir).map(|_| ())
        })
        .commit("Recipe removed")?;

    println!("Removed recipe '{}'", name);
    Ok(())
}
