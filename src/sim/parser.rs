//! Text level plans
//!
//! A plan is a list of rows; each character is one cell. Obstacle symbols
//! go into the grid, entity symbols are spawned through a legend at
//! `(column, row)`, anything else is empty space.
//!
//! ```text
//! "     v   "
//! "  @    o "
//! "xxxxx!!xx"
//! ```

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::grid::{Grid, Obstacle};
use super::level::Level;
use super::vector::Vector;
use crate::error::{Result, SimError};

/// Entity factory for one legend symbol
pub type Spawn = fn(Vector, &mut Pcg32) -> Entity;

/// Builds levels from text plans
#[derive(Debug, Clone)]
pub struct LevelParser {
    legend: HashMap<char, Spawn>,
    rng: Pcg32,
}

impl LevelParser {
    pub fn new(legend: HashMap<char, Spawn>, seed: u64) -> Self {
        Self {
            legend,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Parser with the standard symbol table
    pub fn standard(seed: u64) -> Self {
        Self::new(Self::standard_legend(), seed)
    }

    /// `@` player, `o` coin, `=` horizontal fireball, `|` vertical fireball, `v` fire rain
    pub fn standard_legend() -> HashMap<char, Spawn> {
        let mut legend: HashMap<char, Spawn> = HashMap::new();
        legend.insert('@', |pos, _| Entity::player(pos));
        legend.insert('o', Entity::coin::<Pcg32>);
        legend.insert('=', |pos, _| Entity::horizontal_fireball(pos));
        legend.insert('|', |pos, _| Entity::vertical_fireball(pos));
        legend.insert('v', |pos, _| Entity::fire_rain(pos));
        legend
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<Spawn> {
        self.legend.get(&symbol).copied()
    }

    pub fn obstacle_from_symbol(symbol: char) -> Option<Obstacle> {
        Obstacle::from_symbol(symbol)
    }

    /// Obstacle grid of a plan; entity symbols leave empty cells
    pub fn create_grid<S: AsRef<str>>(&self, rows: &[S]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|row| row.as_ref().chars().map(Self::obstacle_from_symbol).collect())
                .collect(),
        )
    }

    /// Entities of a plan in row-major order; unmapped symbols are skipped
    pub fn create_entities<S: AsRef<str>>(&mut self, rows: &[S]) -> Vec<Entity> {
        let mut entities = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                if let Some(spawn) = self.actor_from_symbol(symbol) {
                    entities.push(spawn(Vector::new(x as f32, y as f32), &mut self.rng));
                }
            }
        }
        entities
    }

    pub fn parse<S: AsRef<str>>(&mut self, rows: &[S]) -> Level {
        let grid = self.create_grid(rows);
        Level::new(grid, self.create_entities(rows))
    }
}

/// A named level plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPlan {
    #[serde(default)]
    pub name: Option<String>,
    pub rows: Vec<String>,
}

impl LevelPlan {
    pub fn build(&self, parser: &mut LevelParser) -> Result<Level> {
        if self.rows.is_empty() {
            return Err(SimError::EmptyPlan);
        }
        Ok(parser.parse(&self.rows))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlanEntry {
    Rows(Vec<String>),
    Named(LevelPlan),
}

/// Read a JSON array of plans, either `{ "name", "rows" }` objects or bare row arrays
pub fn load_plans(json: &str) -> Result<Vec<LevelPlan>> {
    let entries: Vec<PlanEntry> = serde_json::from_str(json)?;
    let plans: Vec<LevelPlan> = entries
        .into_iter()
        .map(|entry| match entry {
            PlanEntry::Rows(rows) => LevelPlan { name: None, rows },
            PlanEntry::Named(plan) => plan,
        })
        .collect();
    if plans.iter().any(|plan| plan.rows.is_empty()) {
        return Err(SimError::EmptyPlan);
    }
    log::info!("Loaded {} level plans", plans.len());
    Ok(plans)
}
