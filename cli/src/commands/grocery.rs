//! # hgy Grocery Command
//!
//! File: cli/src/commands/grocery.rs
//!
//! ## Overview
//!
//! `hgy grocery` prints one shopping list for several recipes, each scaled to
//! the same number of persons:
//!
//! ```text
//! $ hgy grocery -p 4 pizza chili
//! Persons: 4
//! 1-2 chilis
//! 500g flour
//! 4 onions
//! ```
//!
//! Recipes are given by name, or read from meal plans written by `hgy plan`
//! (`--plan week.yml`). `--persons` defaults to `grocery.persons` from the
//! configuration; `-p 0` keeps every recipe at its own serving count.
//!
use crate::commands::plan::read_plan;
use crate::commands::{open_archive, Archive};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::quantity::GroceryList;
use crate::core::recipe::Recipe;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(about = "Print a merged shopping list")]
pub struct GroceryArgs {
    /// Number of persons to shop for (0: each recipe's own servings).
    #[arg(short, long)]
    persons: Option<u32>,

    /// Meal plan files (from `hgy plan`) to take the recipes from.
    #[arg(long, num_args = 1.., value_name = "PLAN", conflicts_with = "names")]
    plan: Vec<PathBuf>,

    /// Recipes to shop for.
    #[arg(required_unless_present = "plan")]
    names: Vec<String>,
}

pub fn handle_grocery(args: GroceryArgs, config: &Config) -> Result<()> {
    info!(
        "Handling grocery command (Names: {:?}, Plans: {:?}, Persons: {:?})",
        args.names, args.plan, args.persons
    );
    let Archive { store, .. } = open_archive(config)?;
    let persons = args.persons.unwrap_or(config.grocery.persons);

    let mut names = args.names;
    for plan in &args.plan {
        names.extend(read_plan(plan)?);
    }
    debug!("Shopping for {} recipe(s)", names.len());

    let recipes = names
        .iter()
        .map(|name| store.load_recipe(name))
        .collect::<Result<Vec<Recipe>>>()?;
    let list = GroceryList::from_recipes(&recipes, |recipe| target_persons(persons, recipe))?;
    if list.is_empty() {
        info!("No ingredients listed in {:?}", names);
    } else {
        debug!("Merged into {} grocery item(s)", list.len());
    }

    println!("Persons: {}", persons);
    for line in list.to_sorted_lines() {
        println!("{}", line);
    }
    Ok(())
}

/// Target serving count for `recipe`; zero falls back to the recipe's own.
pub(crate) fn target_persons(requested: u32, recipe: &Recipe) -> u32 {
    if requested == 0 {
        recipe.persons
    } else {
        requested
    }
}
