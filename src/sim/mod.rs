//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod grid;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use collision::{CellSpan, boxes_overlap};
pub use entity::{Entity, EntityId, EntityKind};
pub use grid::{Grid, Obstacle};
pub use level::{Level, Status, Touched};
pub use parser::{LevelParser, LevelPlan, Spawn, load_plans};
pub use tick::{TickReport, advance_entities, resolve_contacts, run, tick};
pub use vector::Vector;
