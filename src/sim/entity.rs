//! Moving entities: player, coins and the fireball family
//!
//! Every entity is an axis-aligned box with a velocity. The kind is fixed at
//! construction; per-kind motion data lives in a private [`Motion`] payload
//! and a single [`Entity::update`] dispatches on it.

use std::f32::consts::TAU;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::boxes_overlap;
use super::grid::Grid;
use super::vector::Vector;
use crate::consts::*;
use crate::error::Result;
use crate::vec2;

/// Stable handle of an entity inside a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    /// Generic entity with no behavior of its own
    #[default]
    Actor,
    Player,
    Coin,
    /// Fireball with a caller-chosen velocity
    Fireball,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Actor => "actor",
            EntityKind::Player => "player",
            EntityKind::Coin => "coin",
            EntityKind::Fireball => "fireball",
            EntityKind::HorizontalFireball => "fireball-horizontal",
            EntityKind::VerticalFireball => "fireball-vertical",
            EntityKind::FireRain => "fire-rain",
        }
    }

    /// True for every member of the fireball family (all of them are lethal)
    pub fn is_fireball(&self) -> bool {
        matches!(
            self,
            EntityKind::Fireball
                | EntityKind::HorizontalFireball
                | EntityKind::VerticalFireball
                | EntityKind::FireRain
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind motion rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Motion {
    /// Never moves on its own
    Still,
    /// Bobs vertically around a fixed base position
    Oscillate { base: Vector, spring: f32 },
    /// Translates; reverses velocity on contact with an obstacle
    Bounce,
    /// Translates; jumps back to its spawn point on contact with an obstacle
    Reset { spawn: Vector },
}

/// A moving box in tile space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: Option<EntityId>,
    kind: EntityKind,
    /// Top-left corner
    pub pos: Vector,
    pub size: Vector,
    /// Tiles per second
    pub vel: Vector,
    motion: Motion,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(Vector::ZERO, Vector::ONE, Vector::ZERO)
    }
}

impl Entity {
    /// Generic entity with explicit geometry
    pub fn new(pos: Vector, size: Vector, vel: Vector) -> Self {
        Self {
            id: None,
            kind: EntityKind::Actor,
            pos,
            size,
            vel,
            motion: Motion::Still,
        }
    }

    pub fn with_pos(mut self, pos: Vector) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vector) -> Self {
        self.size = size;
        self
    }

    pub fn with_vel(mut self, vel: Vector) -> Self {
        self.vel = vel;
        self
    }

    /// Player standing on the cell at `pos` (the box is taller than a tile)
    pub fn player(pos: Vector) -> Self {
        Self {
            kind: EntityKind::Player,
            ..Self::new(pos + vec2(PLAYER_OFFSET), vec2(PLAYER_SIZE), Vector::ZERO)
        }
    }

    /// Coin in the cell at `pos`, with a random starting phase
    pub fn coin<R: Rng + ?Sized>(pos: Vector, rng: &mut R) -> Self {
        Self::coin_with_phase(pos, rng.random_range(0.0..TAU))
    }

    /// Coin in the cell at `pos` with a known starting phase
    pub fn coin_with_phase(pos: Vector, spring: f32) -> Self {
        let base = pos + vec2(COIN_OFFSET);
        Self {
            kind: EntityKind::Coin,
            motion: Motion::Oscillate { base, spring },
            ..Self::new(base, vec2(COIN_SIZE), Vector::ZERO)
        }
    }

    /// One-tile fireball bouncing at `vel`
    pub fn fireball(pos: Vector, vel: Vector) -> Self {
        Self {
            kind: EntityKind::Fireball,
            motion: Motion::Bounce,
            ..Self::new(pos, Vector::ONE, vel)
        }
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self {
            kind: EntityKind::HorizontalFireball,
            ..Self::fireball(pos, Vector::new(HORIZONTAL_FIREBALL_SPEED, 0.0))
        }
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self {
            kind: EntityKind::VerticalFireball,
            ..Self::fireball(pos, Vector::new(0.0, VERTICAL_FIREBALL_SPEED))
        }
    }

    /// Falling fireball that restarts from `pos` whenever it lands
    pub fn fire_rain(pos: Vector) -> Self {
        Self {
            kind: EntityKind::FireRain,
            motion: Motion::Reset { spawn: pos },
            ..Self::new(pos, Vector::ONE, Vector::new(0.0, FIRE_RAIN_SPEED))
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Current bob phase, for coins
    pub fn spring(&self) -> Option<f32> {
        match self.motion {
            Motion::Oscillate { spring, .. } => Some(spring),
            _ => None,
        }
    }

    /// Fixed anchor the entity returns to or oscillates around
    pub fn anchor(&self) -> Option<Vector> {
        match self.motion {
            Motion::Oscillate { base, .. } => Some(base),
            Motion::Reset { spawn } => Some(spawn),
            Motion::Still | Motion::Bounce => None,
        }
    }

    /// Identity check: same level id, or the very same value when unregistered
    pub fn is_same(&self, other: &Entity) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => std::ptr::eq(self, other),
        }
    }

    /// Whether two distinct entities overlap; touching edges do not count
    pub fn intersects(&self, other: &Entity) -> bool {
        if self.is_same(other) {
            return false;
        }
        boxes_overlap(self.pos, self.size, other.pos, other.size)
    }

    /// Advance by `dt` seconds against the level's obstacles
    pub fn update(&mut self, dt: f32, grid: &Grid) -> Result<()> {
        match &mut self.motion {
            Motion::Still => {}
            Motion::Oscillate { base, spring } => {
                *spring += COIN_SPRING_SPEED * dt;
                self.pos = *base + Vector::new(0.0, spring.sin() * COIN_SPRING_DIST);
            }
            Motion::Bounce => {
                let next = self.pos + self.vel * dt;
                if let Some(obstacle) = grid.obstacle_at(next, self.size)? {
                    log::trace!("{} {:?} hit {}, reversing", self.kind, self.id, obstacle);
                    self.vel = self.vel * -1.0;
                } else {
                    self.pos = next;
                }
            }
            Motion::Reset { spawn } => {
                let next = self.pos + self.vel * dt;
                if let Some(obstacle) = grid.obstacle_at(next, self.size)? {
                    log::trace!("{} {:?} hit {}, respawning", self.kind, self.id, obstacle);
                    self.pos = *spawn;
                } else {
                    self.pos = next;
                }
            }
        }
        Ok(())
    }
}
