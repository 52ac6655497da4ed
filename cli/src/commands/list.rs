//! # hgy List Command
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! `hgy list [--images]` prints every recipe of the index in sorted order as
//! `<name> (<display name>)`, optionally followed by its images.
//!
use crate::commands::{open_archive, Archive};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::recipe::Recipe;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "List the recipes of the archive")]
pub struct ListArgs {
    /// Also print the images of each recipe.
    #[arg(short, long)]
    images: bool,
}

pub fn handle_list(args: ListArgs, config: &Config) -> Result<()> {
    info!("Handling list command (Images: {})", args.images);
    let Archive { store, .. } = open_archive(config)?;

    for name in store.names() {
        let recipe = store.load_recipe(name)?;
        for line in format_entry(name, &recipe, args.images) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn format_entry(name: &str, recipe: &Recipe, images: bool) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", name, recipe.name)];
    if images {
        lines.extend(recipe.images.iter().map(|image| format!("    {}", image)));
    }
    lines
}
