//! # hgy Move Command
//!
//! File: cli/src/commands/mv.rs
//!
//! ## Overview
//!
//! `hgy mv <name> <new-name>` renames a recipe: the record file, its image
//! directory `.images/<name>/`, the image paths inside the record, and the
//! index entry. Everything lands in one `Recipe moved` commit.
//!
//! The destination record must not exist unless `--force` is given.
//!
use crate::commands::{open_archive, Archive};
use crate::common::fs::io;
use crate::common::vcs::Transaction;
use crate::core::config::Config;
use crate::core::error::{HgyError, Result};
use clap::Parser;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Rename a recipe")]
pub struct MvArgs {
    /// Overwrite an existing record at the destination.
    #[arg(short, long)]
    force: bool,

    /// Current name of the recipe.
    name: String,

    /// New name of the recipe.
    new_name: String,
}

pub fn handle_mv(args: MvArgs, config: &Config) -> Result<()> {
    info!(
        "Handling mv command ({} -> {}, Force: {})",
        args.name, args.new_name, args.force
    );
    let Archive { mut store, git } = open_archive(config)?;
    let (old, new) = (args.name.as_str(), args.new_name.as_str());

    if !store.contains(old) {
        return Err(HgyError::RecipeNotFound {
            name: old.to_string(),
        }
        .into());
    }
    let old_path = store.recipe_path(old);
    let new_path = store.recipe_path(new);
    if !args.force {
        io::guard_not_exists(&new_path)?;
    }

    let mut recipe = store.load_recipe(old)?;
    let old_images = store.image_dir(old);
    let new_images = store.image_dir(new);
    let archive = store.dir().to_path_buf();
    let move_images = !recipe.images.is_empty() && archive.join(&old_images).is_dir();
    recipe.images = recipe
        .images
        .iter()
        .map(|image| rebase_image(image, &old_images, &new_images))
        .collect();

    store.remove(old);
    store.insert(new);

    let mut tx = Transaction::new(&git)
        .step("Moving record", || io::rename_path(&old_path, &new_path))
        .step("Rewriting image paths", || recipe.save(&new_path));
    if move_images {
        tx = tx.step("Moving images", || {
            io::rename_path(&archive.join(&old_images), &archive.join(&new_images))
        });
    }
    tx = tx
        .step("Saving index", || store.save())
        .stage(store.filename())
        .stage(old)
        .stage(new);
    if move_images {
        tx = tx.stage(&old_images).stage(&new_images);
    }
    tx.commit("Recipe moved")?;

    println!("Moved recipe '{}' to '{}'", old, new);
    Ok(())
}

/// Moves `image` below `to` if it lives below `from`; other paths are kept.
fn rebase_image(image: &str, from: &Path, to: &Path) -> String {
    match Path::new(image).strip_prefix(from) {
        Ok(rest) => to.join(rest).to_string_lossy().into_owned(),
        Err(_) => image.to_string(),
    }
}
