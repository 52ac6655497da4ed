//! # hgy Plan Command
//!
//! File: cli/src/commands/plan.rs
//!
//! ## Overview
//!
//! `hgy plan [<from>] [<to>]` writes a random meal plan to stdout as YAML,
//! one recipe per day:
//!
//! ```yaml
//! '20261019': pizza
//! '20261020': chili
//! ```
//!
//! Dates use the `YYYYMMDD` format. The plan starts at `<from>` (default:
//! today) and covers the days up to, but excluding, `<to>`; without `<to>` it
//! covers as many days as there are recipes. Recipes are drawn from a shuffled
//! copy of the index; when it runs out a new permutation is drawn, so no recipe
//! repeats before all others were used.
//!
//! Saved plans feed back into `hgy grocery --plan`, which reads them with
//! `read_plan`.
//!
use crate::commands::{open_archive, Archive};
use crate::common::fs::io;
use crate::core::config::Config;
use crate::core::error::{HgyError, Result};
use anyhow::{anyhow, Context};
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Parser, Debug)]
#[command(about = "Print a random meal plan")]
pub struct PlanArgs {
    /// First day of the plan (YYYYMMDD). Defaults to today.
    from: Option<String>,

    /// Day after the last day of the plan (YYYYMMDD).
    to: Option<String>,
}

pub fn handle_plan(args: PlanArgs, config: &Config) -> Result<()> {
    info!("Handling plan command (From: {:?}, To: {:?})", args.from, args.to);
    let Archive { store, .. } = open_archive(config)?;
    if store.is_empty() {
        return Err(anyhow!(HgyError::Store("No recipes found".to_string())));
    }

    let from = match &args.from {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };
    let days = match &args.to {
        Some(date) => days_between(from, parse_date(date)?)?,
        None => store.len(),
    };

    let names: Vec<&str> = store.names().collect();
    let plan = make_plan(&names, from, days, &mut rand::thread_rng());
    let yaml = serde_yaml::to_string(&plan).context("Converting plan to yaml failed")?;
    print!("{}", yaml);
    Ok(())
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| {
        anyhow!(HgyError::ArgumentParsing(format!(
            "Invalid date '{}', expected YYYYMMDD ({})",
            date, e
        )))
    })
}

fn days_between(from: NaiveDate, to: NaiveDate) -> Result<usize> {
    usize::try_from((to - from).num_days()).map_err(|_| {
        anyhow!(HgyError::ArgumentParsing(format!(
            "End date {} lies before start date {}",
            to.format(DATE_FORMAT),
            from.format(DATE_FORMAT)
        )))
    })
}

/// Assigns a recipe to each of `days` consecutive days starting at `from`.
pub fn make_plan<R: Rng + ?Sized>(
    names: &[&str],
    from: NaiveDate,
    days: usize,
    rng: &mut R,
) -> BTreeMap<String, String> {
    let mut pool: Vec<&str> = Vec::with_capacity(names.len());
    let mut plan = BTreeMap::new();
    for offset in 0..days {
        if pool.is_empty() {
            pool.extend_from_slice(names);
            pool.shuffle(rng);
        }
        let Some(date) = from.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        let name = pool.pop().unwrap_or_default();
        plan.insert(date.format(DATE_FORMAT).to_string(), name.to_string());
    }
    debug!("Planned {} day(s)", plan.len());
    plan
}

/// Reads the recipe names of a saved plan, in file order.
pub fn read_plan(path: &Path) -> Result<Vec<String>> {
    let content = io::read_file_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let plan: serde_yaml::Mapping = serde_yaml::from_str(&content)
        .with_context(|| format!("Possibly not a valid plan in '{}'", path.display()))?;
    plan.into_iter()
        .map(|(date, name)| {
            name.as_str().map(str::to_string).ok_or_else(|| {
                anyhow!(HgyError::Store(format!(
                    "Plan '{}' has no recipe name for {:?}",
                    path.display(),
                    date
                )))
            })
        })
        .collect()
}
