//! # hgy Cook Command
//!
//! File: cli/src/commands/cook.rs
//!
//! ## Overview
//!
//! `hgy cook [-p <persons>] <name>` is the kitchen mode: it prints the
//! ingredients scaled to `<persons>` (default: the recipe's own servings) and
//! then walks through the preparation steps, one per Enter press. Each prompt
//! shows the elapsed time next to the recipe's preparation time:
//!
//! ```text
//! [03:12/20m] Chop the onions.
//! ```
//!
//! End of input (Ctrl-D) stops the walk early.
//!
use crate::commands::grocery::target_persons;
use crate::commands::{open_archive, Archive};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::quantity::GroceryList;
use crate::core::recipe::Recipe;
use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Cook a recipe step by step")]
pub struct CookArgs {
    /// Number of persons to cook for. Defaults to the recipe's servings.
    #[arg(short, long, default_value_t = 0)]
    persons: u32,

    /// Name of the recipe.
    name: String,
}

pub fn handle_cook(args: CookArgs, config: &Config) -> Result<()> {
    info!("Handling cook command (Name: {}, Persons: {})", args.name, args.persons);
    let Archive { store, .. } = open_archive(config)?;
    let recipe = store.load_recipe(&args.name)?;
    let persons = target_persons(args.persons, &recipe);

    let mut list = GroceryList::new();
    list.add_recipe(&recipe, persons)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Persons: {}", persons)?;
    for line in list.to_sorted_lines() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;

    let started = Instant::now();
    walk_steps(&recipe, stdin.lock(), &mut out, || started.elapsed().as_secs())
}

/// Prints the steps of `recipe` one at a time, advancing on each input line.
fn walk_steps<R, W, C>(recipe: &Recipe, mut input: R, out: &mut W, elapsed_secs: C) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: Fn() -> u64,
{
    let expected = if recipe.duration.preparation.is_empty() {
        "-"
    } else {
        recipe.duration.preparation.as_str()
    };
    let mut line = String::new();

    for step in &recipe.recipe {
        write!(out, "{} {}", clock(elapsed_secs(), expected), step)?;
        out.flush()?;
        line.clear();
        let read = input
            .read_line(&mut line)
            .context("Reading from stdin failed")?;
        if read == 0 {
            writeln!(out)?;
            return Ok(());
        }
    }
    writeln!(out, "{} Done.", clock(elapsed_secs(), expected))?;
    Ok(())
}

fn clock(secs: u64, expected: &str) -> String {
    format!("[{:02}:{:02}/{}]", secs / 60, secs % 60, expected)
}
