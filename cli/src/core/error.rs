//! # hgy Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout hgy. Specific failure
//! kinds are variants of `HgyError`; everything travels as `anyhow::Error` so
//! callers can attach context with `.context(...)` and `main` can still
//! downcast to a variant when it needs to react to one.
//!
//! Errors of the version-control transaction live next to the transaction
//! itself (`common::vcs::transaction::TransactionError`), because they carry
//! two causes (the failing step and the failing rollback).
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !store.contains(name) {
//!     return Err(HgyError::RecipeNotFound { name: name.to_string() })?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read recipe: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for hgy.
#[derive(Error, Debug)]
pub enum HgyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Seems not to be a hgy archive in '{dir}': {reason}")]
    NotAnArchive { dir: String, reason: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("No recipe found with the name '{name}'")]
    RecipeNotFound { name: String },

    #[error("Recipe '{name}' already exists")]
    RecipeExists { name: String },

    #[error("Destination already exists ({path}). Use --force to ignore this")]
    DestinationExists { path: String },

    #[error("Invalid servings for '{recipe}': base {base}, target {target}")]
    InvalidServings {
        recipe: String,
        base: u32,
        target: u32,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
