//! # hgy Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the hgy CLI, a recipe archive kept in git.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each command (`init`, `add`, `grocery`, ...) is a variant of the
//!   `Commands` enum holding the `...Args` struct of its module.
//! - All errors are propagated to this level, printed as `Error: ...` and turned
//!   into exit status 1. A transaction whose rollback failed additionally gets
//!   a warning, since the archive then needs to be inspected by hand.
//!
//! ## Examples
//!
//! ```bash
//! hgy init ~/recipes
//! export HGY_DIR=~/recipes
//! hgy add pizza
//! hgy -v grocery -p 4 pizza chili
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // One module per subcommand
mod common; // Shared utilities (fs, process, vcs)
mod core; // Domain model and infrastructure (config, errors, recipes, store)

use crate::common::vcs::TransactionError;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "hgy",
    about = "Recipe archive in git, with grocery lists scaled to any number of persons",
    long_about = "Keeps recipes as YAML records in a git repository.\n\
                  Every change is committed; grocery lists merge and scale the ingredients of many recipes.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Archive directory. Defaults to `archive.directory` from the config, then `.`.
    #[arg(short, long, env = "HGY_DIR", global = true)]
    dir: Option<PathBuf>,
}

/// Enum defining all available commands.
#[derive(Parser, Debug)]
enum Commands {
    Init(commands::init::InitArgs),
    #[command(alias = "a")]
    Add(commands::add::AddArgs),
    #[command(alias = "e")]
    Edit(commands::edit::EditArgs),
    Mv(commands::mv::MvArgs),
    Rm(commands::rm::RmArgs),
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
    #[command(alias = "g")]
    Grocery(commands::grocery::GroceryArgs),
    Cook(commands::cook::CookArgs),
    Plan(commands::plan::PlanArgs),
    Render(commands::render::RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Command execution failed: {:?}", e);
        if let Some(TransactionError::RollbackFailed { .. }) = e.downcast_ref::<TransactionError>() {
            eprintln!("Warning: The archive may be in an inconsistent state. Check it with 'git status'.");
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> crate::core::error::Result<()> {
    let config = crate::core::config::load_config(cli.dir.as_deref())?;

    match cli.command {
        Commands::Init(args) => commands::init::handle_init(args, &config),
        Commands::Add(args) => commands::add::handle_add(args, &config),
        Commands::Edit(args) => commands::edit::handle_edit(args, &config),
        Commands::Mv(args) => commands::mv::handle_mv(args, &config),
        Commands::Rm(args) => commands::rm::handle_rm(args, &config),
        Commands::List(args) => commands::list::handle_list(args, &config),
        Commands::Grocery(args) => commands::grocery::handle_grocery(args, &config),
        Commands::Cook(args) => commands::cook::handle_cook(args, &config),
        Commands::Plan(args) => commands::plan::handle_plan(args, &config),
        Commands::Render(args) => commands::render::handle_render(args, &config),
    }
}
