//! # hgy Quantity Engine
//!
//! File: cli/src/core/quantity.rs
//!
//! ## Overview
//!
//! This module turns the free-form ingredient lines of recipe records into
//! merged grocery lists. It has two parts:
//!
//! - **`parse_ingredient`**: splits a line such as `250g pork` or
//!   `1-2 cups mushrooms` into a magnitude (optionally a range) and the
//!   unit-and-name suffix that follows it.
//! - **`GroceryList`**: an accumulator keyed by that suffix. Each recipe added
//!   to it is scaled from its own serving count to the target serving count,
//!   merged additively, and passed through the unit normalization table.
//!
//! ## Grammar
//!
//! ```text
//! line   := digits? ( "-" digits? )? suffix
//! digits := numeric+
//! ```
//!
//! A digit is any character Unicode classifies as numeric, so `½` and `²` are
//! scanned as part of a run. The `-` only starts a range when it directly
//! follows the first digit run; a `-` ending the line is kept as the suffix.
//! The suffix is used verbatim, including its first character, so `1 cup` and
//! `1cup` aggregate under different keys (` cup` and `cup`).
//!
//! Parsing never fails. A run that is not a plain decimal `u64` (`½`, or one
//! that overflows) counts as zero.
//!
//! ## Examples
//!
//! ```rust
//! let mut list = GroceryList::new();
//! for recipe in &recipes {
//!     list.add_recipe(recipe, 4)?;
//! }
//! for line in list.to_sorted_lines() {
//!     println!("{}", line);
//! }
//! ```
//!
use crate::core::error::{HgyError, Result};
use crate::core::recipe::Recipe;
use std::collections::BTreeMap;
use std::ops::AddAssign;
use tracing::{debug, trace};

/// A magnitude with an optional upper bound. `to == 0.0` means "no range".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantityRange {
    pub from: f64,
    pub to: f64,
}

impl QuantityRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Multiplies both bounds by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            from: self.from * factor,
            to: self.to * factor,
        }
    }
}

impl AddAssign for QuantityRange {
    fn add_assign(&mut self, other: Self) {
        self.from += other.from;
        self.to += other.to;
    }
}

/// One parsed ingredient line. The suffix borrows from the input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ingredient<'a> {
    pub suffix: &'a str,
    pub range: QuantityRange,
}

/// Splits an ingredient line into its quantity range and unit-and-name suffix.
pub fn parse_ingredient(line: &str) -> Ingredient<'_> {
    let first_end = numeric_run_end(line, 0);

    if first_end == 0 {
        return Ingredient {
            suffix: line,
            range: QuantityRange::default(),
        };
    }

    let from = magnitude(&line[..first_end]);

    if line[first_end..].starts_with('-') {
        let second_start = first_end + 1;
        let second_end = numeric_run_end(line, second_start);
        // A dash closing the line has nothing to introduce and stays the suffix.
        let suffix_start = if second_end == line.len() && second_start == second_end {
            first_end
        } else {
            second_end
        };
        return Ingredient {
            suffix: &line[suffix_start..],
            range: QuantityRange::new(from, magnitude(&line[second_start..second_end])),
        };
    }

    Ingredient {
        suffix: &line[first_end..],
        range: QuantityRange::new(from, 0.0),
    }
}

/// Byte index of the first non-numeric character at or after `start`.
fn numeric_run_end(line: &str, start: usize) -> usize {
    line[start..]
        .char_indices()
        .find(|(_, c)| !c.is_numeric())
        .map_or(line.len(), |(offset, _)| start + offset)
}

fn magnitude(digits: &str) -> f64 {
    digits.parse::<u64>().map(|n| n as f64).unwrap_or(0.0)
}

/// A unit that collapses into a smaller one when its magnitude drops below 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRule {
    pub source: &'static str,
    pub dest: &'static str,
    pub multiplier: f64,
}

/// The complete set of unit normalizations. Nothing outside this table is converted.
pub const UNIT_NORMALIZATIONS: [UnitRule; 2] = [
    UnitRule {
        source: "kg",
        dest: "g",
        multiplier: 1000.0,
    },
    UnitRule {
        source: "l",
        dest: "ml",
        multiplier: 1000.0,
    },
];

/// Accumulated ingredient quantities keyed by unit-and-name suffix.
///
/// The map is ordered, so iteration already yields the lexicographic
/// (byte-wise) key order the output requires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroceryList {
    entries: BTreeMap<String, QuantityRange>,
}

impl GroceryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a sequence of recipes into a fresh list.
    ///
    /// `persons_for` picks the target serving count per recipe, which is where
    /// callers apply their fallback to the recipe's own servings.
    pub fn from_recipes<'r, I, F>(recipes: I, persons_for: F) -> Result<Self>
    where
        I: IntoIterator<Item = &'r Recipe>,
        F: Fn(&Recipe) -> u32,
    {
        recipes
            .into_iter()
            .try_fold(Self::new(), |mut list, recipe| -> Result<Self> {
                list.add_recipe(recipe, persons_for(recipe))?;
                Ok(list)
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, suffix: &str) -> Option<&QuantityRange> {
        self.entries.get(suffix)
    }

    /// Adds `range` to the entry for `suffix`, creating it if needed.
    pub fn merge(&mut self, suffix: impl Into<String>, range: QuantityRange) {
        *self.entries.entry(suffix.into()).or_default() += range;
    }

    /// Scales every ingredient of `recipe` to `target_persons` and merges it in.
    ///
    /// # Errors
    ///
    /// Returns `HgyError::InvalidServings` if the recipe's own serving count or
    /// the target is zero. The list is left untouched in that case.
    pub fn add_recipe(&mut self, recipe: &Recipe, target_persons: u32) -> Result<()> {
        if recipe.persons == 0 || target_persons == 0 {
            return Err(HgyError::InvalidServings {
                recipe: recipe.name.clone(),
                base: recipe.persons,
                target: target_persons,
            }
            .into());
        }

        let factor = f64::from(target_persons) / f64::from(recipe.persons);
        debug!(
            "Scaling '{}' from {} to {} persons (factor {})",
            recipe.name, recipe.persons, target_persons, factor
        );

        for line in &recipe.ingredients {
            let ingredient = parse_ingredient(line);
            trace!("Parsed {:?} as {:?}", line, ingredient);
            self.merge(ingredient.suffix, ingredient.range.scaled(factor));
        }

        self.normalize_units();
        Ok(())
    }

    /// Moves every entry below 1 of a unit in `UNIT_NORMALIZATIONS` to the
    /// smaller unit, merging with an existing entry there.
    ///
    /// Only `from` is checked against the threshold, and the unit is the text
    /// before the first space of the suffix. Moved entries are not re-checked.
    pub fn normalize_units(&mut self) {
        let moves: Vec<(String, String, f64)> = self
            .entries
            .iter()
            .filter(|(_, range)| range.from < 1.0)
            .filter_map(|(key, _)| {
                let (unit, rest) = key.split_once(' ')?;
                let rule = UNIT_NORMALIZATIONS.iter().find(|rule| rule.source == unit)?;
                Some((key.clone(), format!("{} {}", rule.dest, rest), rule.multiplier))
            })
            .collect();

        for (key, dest, multiplier) in moves {
            if let Some(range) = self.entries.remove(&key) {
                debug!("Normalizing '{}' into '{}'", key, dest);
                self.merge(dest, range.scaled(multiplier));
            }
        }
    }

    /// Renders the list as display lines, sorted by suffix.
    pub fn to_sorted_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(suffix, range)| {
                let from = round_half_up(range.from);
                let to = round_half_up(range.to);
                if from == 0 {
                    suffix.clone()
                } else if to == 0 || from == to {
                    format!("{}{}", from, suffix)
                } else {
                    format!("{}-{}{}", from, to, suffix)
                }
            })
            .collect()
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
