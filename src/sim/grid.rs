//! Static obstacle grid
//!
//! Row index is y, column index is x. Rows may have different lengths; a
//! missing cell is empty. Beyond the grid the world is walled on the left,
//! top and right, and lava lies below.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::CellSpan;
use super::vector::{Vector, ensure_finite};
use crate::error::Result;

/// Static obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obstacle {
    Wall,
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }

    /// Map a level symbol to an obstacle
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows of optional obstacles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Option<Obstacle>>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<Option<Obstacle>>] {
        &self.rows
    }

    /// Obstacle stored at a cell, `None` for empty or missing cells
    pub fn cell(&self, x: i64, y: i64) -> Option<Obstacle> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied().flatten()
    }

    /// First obstacle touched by a box placed at `pos` with `size`
    ///
    /// Boundary checks win over grid contents: left/top/right overflow is a
    /// wall, bottom overflow is lava, with the wall test applied first.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        let pos = ensure_finite(pos, "obstacle position")?;
        let size = ensure_finite(size, "obstacle size")?;
        let span = CellSpan::of(pos, size);

        if span.x_left < 0 || span.x_right > self.width() as i64 || span.y_top < 0 {
            return Ok(Some(Obstacle::Wall));
        }
        if span.y_bottom >= self.height() as i64 {
            return Ok(Some(Obstacle::Lava));
        }

        Ok(span.cells().find_map(|(x, y)| self.cell(x, y)))
    }
}
