//! Axis-aligned box geometry
//!
//! Entities and obstacle queries are boxes described by a top-left corner
//! and a size. Overlap uses strict inequalities: boxes that only share an
//! edge do not collide, which lets entities rest flush against walls.

use super::vector::Vector;

/// Check whether two boxes overlap with non-zero area
#[inline]
pub fn boxes_overlap(a_pos: Vector, a_size: Vector, b_pos: Vector, b_size: Vector) -> bool {
    let a_max = a_pos + a_size;
    let b_max = b_pos + b_size;
    a_pos.x < b_max.x && a_max.x > b_pos.x && a_pos.y < b_max.y && a_max.y > b_pos.y
}

/// Inclusive range of grid cells touched by a box
///
/// The far edges are floored too, so a box aligned to whole tiles also
/// covers the next row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub x_left: i64,
    pub x_right: i64,
    pub y_top: i64,
    pub y_bottom: i64,
}

impl CellSpan {
    /// Floor the edges of a box into cell coordinates (inputs must be finite)
    pub fn of(pos: Vector, size: Vector) -> Self {
        let far = pos + size;
        Self {
            x_left: pos.x.floor() as i64,
            x_right: far.x.floor() as i64,
            y_top: pos.y.floor() as i64,
            y_bottom: far.y.floor() as i64,
        }
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (self.y_top..=self.y_bottom).flat_map(move |y| (self.x_left..=self.x_right).map(move |x| (x, y)))
    }
}
