//! # hgy Store (Recipe Index)
//!
//! File: cli/src/core/store.rs
//!
//! ## Overview
//!
//! The store is the `.hgy` file at the archive root: a YAML map from recipe
//! name to `true`. It is the list of recipes that exist. A name is present if
//! and only if the record file `<archive>/<name>` exists; commands that add,
//! move, or remove records update the map and call `save` after every
//! structural change.
//!
//! The store also knows the archive layout:
//!
//! ```text
//! <archive>/
//! ├── .git/
//! ├── .hgy                 # this index
//! ├── <name>               # recipe records (names may contain '/')
//! └── .images/<name>/...   # images of each recipe
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{HgyError, Result};
use crate::core::recipe::Recipe;
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the index inside the archive.
pub const INDEX_FILENAME: &str = ".hgy";
/// Directory holding the images of all recipes.
pub const IMAGES_DIRNAME: &str = ".images";

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    recipes: BTreeMap<String, bool>,
}

impl Store {
    /// An empty store for the archive at `dir`. Nothing is read from disk.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            recipes: BTreeMap::new(),
        }
    }

    /// Opens the existing index of the archive at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::new(dir);
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> Result<()> {
        let path = self.index_path();
        let content = io::read_file_to_string(&path)
            .with_context(|| format!("Reading index {} failed", path.display()))?;
        self.recipes = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                anyhow!(HgyError::Store(format!(
                    "Seems like index {} is not valid yaml ({})",
                    path.display(),
                    e
                )))
            })?
        };
        debug!("Loaded {} recipe(s) from {}", self.recipes.len(), path.display());
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let path = self.index_path();
        let content = serde_yaml::to_string(&self.recipes)
            .with_context(|| format!("Making yaml for index {} failed", path.display()))?;
        io::write_string_to_file(&path, &content)
            .with_context(|| format!("Writing index to {} failed", path.display()))?;
        info!("Saved index with {} recipe(s)", self.recipes.len());
        Ok(())
    }

    /// True if the index file exists and is a regular file.
    pub fn exists(&self) -> bool {
        self.index_path().is_file()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILENAME)
    }

    /// Index path relative to the archive root, as staged in git.
    pub fn filename(&self) -> &'static str {
        INDEX_FILENAME
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    pub fn insert(&mut self, name: &str) {
        self.recipes.insert(name.to_string(), true);
    }

    /// Removes `name`; returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.recipes.remove(name).is_some()
    }

    /// Recipe names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipe_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Archive-relative directory holding the images of `name`.
    pub fn image_dir(&self, name: &str) -> PathBuf {
        Path::new(IMAGES_DIRNAME).join(name)
    }

    /// Loads the record of a known recipe.
    pub fn load_recipe(&self, name: &str) -> Result<Recipe> {
        if !self.contains(name) {
            return Err(HgyError::RecipeNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Recipe::load(&self.recipe_path(name))
    }
}
