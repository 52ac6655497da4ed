//! # hgy Render Command
//!
//! File: cli/src/commands/render.rs
//!
//! ## Overview
//!
//! `hgy render <out-dir>` exports the archive as static HTML that can be
//! opened from disk or served by any web server:
//!
//! ```text
//! <out-dir>/
//! ├── store.html              # overview of all recipes
//! ├── detail/<name>.html      # one page per recipe
//! └── .images/...             # copy of the archive's images
//! ```
//!
use crate::commands::{open_archive, Archive};
use crate::common::fs::{copy, io};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::recipe::Recipe;
use crate::core::store::{Store, IMAGES_DIRNAME};
use crate::core::templating::HtmlRenderer;
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Export the archive as static HTML")]
pub struct RenderArgs {
    /// Directory to write the pages to. Created if missing.
    out_dir: PathBuf,
}

pub fn handle_render(args: RenderArgs, config: &Config) -> Result<()> {
    info!("Handling render command (Output: {})", args.out_dir.display());
    let Archive { store, .. } = open_archive(config)?;
    let pages = render_store(&store, &args.out_dir)?;

    let display_path = match env::current_dir() {
        Ok(cwd) => pathdiff::diff_paths(&args.out_dir, &cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| args.out_dir.display().to_string()),
        Err(_) => args.out_dir.display().to_string(),
    };
    println!("Rendered {} page(s) to {}", pages, display_path);
    Ok(())
}

/// Writes all pages of `store` below `out_dir`; returns the number of pages.
fn render_store(store: &Store, out_dir: &Path) -> Result<usize> {
    let renderer = HtmlRenderer::new()?;
    let recipes = store
        .names()
        .map(|name| Ok((name.to_string(), store.load_recipe(name)?)))
        .collect::<Result<Vec<(String, Recipe)>>>()?;

    io::ensure_dir_exists(out_dir)?;
    io::write_string_to_file(&out_dir.join("store.html"), &renderer.render_index(&recipes)?)?;
    for (name, recipe) in &recipes {
        let page = out_dir.join("detail").join(format!("{}.html", name));
        io::write_string_to_file(&page, &renderer.render_detail(name, recipe)?)?;
    }

    let images = store.dir().join(IMAGES_DIRNAME);
    if images.is_dir() {
        copy::copy_directory_contents(&images, &out_dir.join(IMAGES_DIRNAME))?;
    }
    Ok(recipes.len() + 1)
}
