//! # hgy Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the settings hgy runs with. Most
//! users never need a configuration file: the archive defaults to the current
//! directory, grocery lists to 2 persons and the editor to `$EDITOR` or `vim`.
//!
//! ## Architecture
//!
//! Sources, highest precedence first:
//! 1. Command-line flags (`--dir`, `--persons`)
//! 2. Environment (`HGY_DIR`, `EDITOR`)
//! 3. The user file `config.toml` in the platform config directory
//!    (e.g. `~/.config/hgy/config.toml`), or the file named by `HGY_CONFIG`
//! 4. Default values defined in the code
//!
//! ```toml
//! [archive]
//! directory = "~/recipes"
//!
//! [grocery]
//! persons = 2
//!
//! [editor]
//! command = "nvim"
//! ```
//!
//! `--dir` and `HGY_DIR` are resolved by clap and handed in as the override of
//! `load_config`; `EDITOR` is applied here.
//!
use crate::core::error::{HgyError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub grocery: GroceryConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Where the recipe archive lives.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Archive directory (can use ~). Will be expanded.
    #[serde(default = "default_archive_dir")]
    pub directory: String,
}

/// Defaults for `hgy grocery`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct GroceryConfig {
    /// Persons to scale to when `--persons` is not given.
    #[serde(default = "default_persons")]
    pub persons: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Program (plus arguments) used by `add`, `edit` and `cook`.
    #[serde(default = "default_editor")]
    pub command: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            directory: default_archive_dir(),
        }
    }
}

impl Default for GroceryConfig {
    fn default() -> Self {
        Self {
            persons: default_persons(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: default_editor(),
        }
    }
}

fn default_archive_dir() -> String {
    ".".to_string()
}
fn default_persons() -> u32 {
    2
}
fn default_editor() -> String {
    "vim".to_string()
}

const CONFIG_PATH_ENV: &str = "HGY_CONFIG";
const EDITOR_ENV: &str = "EDITOR";

/// Loads the effective configuration.
///
/// `archive_override` is the already-resolved `--dir`/`HGY_DIR` value, if any.
pub fn load_config(archive_override: Option<&Path>) -> Result<Config> {
    let mut config = load_user_config()?.unwrap_or_default();
    apply_overrides(
        &mut config,
        archive_override,
        std::env::var(EDITOR_ENV).ok().as_deref(),
    );
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    match ProjectDirs::from("org", "hgy", "hgy") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(config_path) = user_config_path() else {
        return Ok(None);
    };
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn apply_overrides(config: &mut Config, archive: Option<&Path>, editor: Option<&str>) {
    if let Some(dir) = archive {
        debug!("Archive directory overridden: {}", dir.display());
        config.archive.directory = dir.to_string_lossy().into_owned();
    }
    if let Some(editor) = editor.filter(|e| !e.trim().is_empty()) {
        debug!("Editor taken from ${}: {}", EDITOR_ENV, editor);
        config.editor.command = editor.to_string();
    }
}

fn expand_config_paths(config: &mut Config) {
    config.archive.directory = shellexpand::tilde(&config.archive.directory).into_owned();
    debug!("Expanded archive directory: {}", config.archive.directory);
}

fn validate_config(config: &Config) -> Result<()> {
    let dir = PathBuf::from(&config.archive.directory);
    if dir.exists() && !dir.is_dir() {
        return Err(anyhow!(HgyError::Config(format!(
            "Archive path '{}' exists but is not a directory.",
            dir.display()
        ))));
    }
    if config.grocery.persons == 0 {
        return Err(anyhow!(HgyError::Config(
            "grocery.persons must be at least 1.".to_string()
        )));
    }
    if config.editor.command.trim().is_empty() {
        return Err(anyhow!(HgyError::Config(
            "editor.command cannot be empty.".to_string()
        )));
    }
    Ok(())
}

impl Config {
    pub fn archive_dir(&self) -> PathBuf {
        PathBuf::from(&self.archive.directory)
    }
}
