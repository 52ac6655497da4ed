//! # hgy Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core of hgy: the infrastructure shared by every
//! command (configuration, errors, HTML templating) and the domain model of a
//! recipe archive.
//!
//! ## Architecture
//!
//! - `config`: User configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `quantity`: Ingredient quantity parser and the grocery aggregation engine
//! - `recipe`: The YAML recipe record
//! - `store`: The `.hgy` index of known recipes
//! - `templating`: HTML rendering for the static export
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{HgyError, Result}; // For error handling
//! use crate::core::quantity::GroceryList; // For merged ingredient lists
//! ```
//!
pub mod config;
pub mod error;
pub mod quantity;
pub mod recipe;
pub mod store;
pub mod templating;
