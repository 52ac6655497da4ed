//! # hgy Add Command
//!
//! File: cli/src/commands/add.rs
//!
//! ## Overview
//!
//! `hgy add` puts a recipe into the archive, or attaches more images to one
//! that is already there.
//!
//! ## Architecture
//!
//! For a **new** recipe:
//! 1. Guard the record path (skipped with `--force`).
//! 2. Import the record from `<path>`, or write a template and open it in the
//!    editor (skipped with `--quiet`).
//! 3. Copy every image the record names into `.images/<name>/`. Image paths in
//!    the record are read relative to the directory the record came from.
//!
//! For an **existing** recipe only `--image` is allowed; `<path>` is an error.
//!
//! In both cases the `--image` files are copied as well, the record's `images`
//! list is rewritten to archive-relative paths, and one transaction saves the
//! record and the index, stages everything and commits either
//! `New recipe added` or `Image added to recipe`.
//!
//! ## Usage
//!
//! ```bash
//! hgy add pizza                       # template + $EDITOR
//! hgy add --quiet pizza ~/pizza.yml   # import an existing record
//! hgy add pizza --image top.jpg       # attach another image
//! ```
//!
use crate::commands::{open_archive, Archive};
use crate::common::fs::io;
use crate::common::process;
use crate::common::vcs::Transaction;
use crate::core::config::Config;
use crate::core::error::{HgyError, Result};
use crate::core::recipe::Recipe;
use anyhow::anyhow;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(about = "Add a recipe, or images to an existing one")]
pub struct AddArgs {
    /// Overwrite a record file at the destination that is not in the index.
    #[arg(short, long)]
    force: bool,

    /// Do not open the editor for a new recipe without <PATH>.
    #[arg(short, long)]
    quiet: bool,

    /// Name of the recipe inside the archive (may contain '/').
    name: String,

    /// Existing record file to import.
    path: Option<PathBuf>,

    /// Image file to attach. Can be given multiple times.
    #[arg(short, long = "image", value_name = "IMAGE")]
    images: Vec<PathBuf>,
}

pub fn handle_add(args: AddArgs, config: &Config) -> Result<()> {
    info!(
        "Handling add command (Name: {}, Path: {:?}, Images: {:?})",
        args.name, args.path, args.images
    );
    let Archive { mut store, git } = open_archive(config)?;
    let name = args.name.as_str();
    let record_path = store.recipe_path(name);
    let exists = store.contains(name);

    // Source directory for image paths named inside the record. `None` means
    // the images are already in the archive.
    let (mut recipe, source_dir) = if exists {
        if args.path.is_some() {
            return Err(HgyError::RecipeExists {
                name: name.to_string(),
            }
            .into());
        }
        (store.load_recipe(name)?, None)
    } else {
        if !args.force {
            io::guard_not_exists(&record_path)?;
        }
        match &args.path {
            Some(path) => {
                let source = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."))
                    .to_path_buf();
                (Recipe::load(path)?, Some(source))
            }
            None => {
                let template = Recipe {
                    name: name.to_string(),
                    persons: config.grocery.persons,
                    ..Default::default()
                };
                template.save(&record_path)?;
                if !args.quiet {
                    process::open_in_editor(&config.editor.command, &record_path)?;
                }
                (Recipe::load(&record_path)?, Some(store.dir().to_path_buf()))
            }
        }
    };

    let archive = store.dir().to_path_buf();
    let image_dir = archive.join(store.image_dir(name));
    let mut images = match &source_dir {
        Some(source) => recipe
            .images
            .iter()
            .map(|image| import_image(&archive, &image_dir, &source.join(image)))
            .collect::<Result<Vec<_>>>()?,
        None => recipe.images.clone(),
    };
    for image in &args.images {
        let relative = import_image(&archive, &image_dir, image)?;
        if !images.contains(&relative) {
            images.push(relative);
        }
    }
    recipe.images = images;
    store.insert(name);

    let message = if exists {
        "Image added to recipe"
    } else {
        "New recipe added"
    };

    let mut tx = Transaction::new(&git)
        .step("Saving record", || recipe.save(&record_path))
        .step("Saving index", || store.save());
    for image in &recipe.images {
        tx = tx.stage(image);
    }
    tx.stage(store.filename()).stage(name).commit(message)?;

    println!("{}: {}", message, name);
    Ok(())
}

/// Copies `source` into `image_dir` and returns its path relative to `archive`.
fn import_image(archive: &Path, image_dir: &Path, source: &Path) -> Result<String> {
    let file_name = source.file_name().ok_or_else(|| {
        anyhow!(HgyError::FileSystem(format!(
            "Image path {} does not name a file",
            source.display()
        )))
    })?;
    let dest = image_dir.join(file_name);

    if is_same_file(source, &dest) {
        debug!("Image {} is already in place", dest.display());
    } else {
        io::copy_file(source, &dest)?;
    }

    let relative = pathdiff::diff_paths(&dest, archive).ok_or_else(|| {
        anyhow!(HgyError::FileSystem(format!(
            "Cannot express {} relative to the archive {}",
            dest.display(),
            archive.display()
        )))
    })?;
    Ok(relative.to_string_lossy().into_owned())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
