//! # hgy Recipe Record
//!
//! File: cli/src/core/recipe.rs
//!
//! ## Overview
//!
//! A recipe lives in one YAML file inside the archive. This module defines the
//! record structure and its load/save operations. Every field is optional in
//! the file; missing keys fall back to empty values so a freshly written
//! template (or an empty file) still parses.
//!
//! ```yaml
//! name: Chili sin carne
//! category: main
//! persons: 4
//! images:
//! - .images/chili/pot.jpg
//! duration:
//!   preparation: 20m
//!   cooking: 40m
//!   total: 1h
//! ingredients:
//! - 2 onions
//! - 1-2 chilis
//! - 500g kidney beans
//! spices:
//! - cumin
//! complementaries:
//! - rice
//! recipe:
//! - Chop the onions.
//! - ...
//! ```
//!
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A single recipe record.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    /// Servings the ingredient quantities are written for.
    pub persons: u32,
    /// Image paths relative to the archive root.
    pub images: Vec<String>,
    pub duration: Duration,
    pub ingredients: Vec<String>,
    pub spices: Vec<String>,
    pub complementaries: Vec<String>,
    /// Ordered preparation steps.
    pub recipe: Vec<String>,
}

/// Free-form durations, e.g. `20m` or `about an hour`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Duration {
    pub preparation: String,
    pub cooking: String,
    pub total: String,
}

impl Recipe {
    /// Reads and parses the record at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_file_to_string(path)?;
        Self::from_yaml(&content)
            .with_context(|| format!("Possibly not valid yaml in '{}'", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            debug!("Empty recipe document, using defaults");
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Converting recipe to yaml failed")
    }

    /// Writes the record to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_string_to_file(path, &self.to_yaml()?)
    }

    pub fn has_image(&self, image: &str) -> bool {
        self.images.iter().any(|i| i == image)
    }
}
