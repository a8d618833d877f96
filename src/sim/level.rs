//! Level state: obstacle grid, entity list and the win/loss rule
//!
//! The level owns its entities. The player is tracked by [`EntityId`] and
//! resolved on demand, so removing entities never leaves a stale handle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::grid::{Grid, Obstacle};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::Result;

/// Level outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Running,
    Won,
    Lost,
}

impl Status {
    /// Won and Lost are final
    pub fn is_terminal(&self) -> bool {
        *self != Status::Running
    }
}

/// What the player came into contact with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Touched {
    Obstacle(Obstacle),
    Entity(EntityKind),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<EntityKind> for Touched {
    fn from(kind: EntityKind) -> Self {
        Touched::Entity(kind)
    }
}

impl fmt::Display for Touched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Touched::Obstacle(obstacle) => fmt::Display::fmt(obstacle, f),
            Touched::Entity(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    /// Entities in spawn order (order decides `actor_at` ties)
    entities: Vec<Entity>,
    player: Option<EntityId>,
    status: Status,
    /// Counts down once the outcome is decided
    pub finish_delay: f32,
    next_id: u32,
}

impl Default for Level {
    fn default() -> Self {
        Self::new(Grid::default(), Vec::new())
    }
}

impl Level {
    /// Build a level, assigning ids in list order and locating the first player
    pub fn new(grid: Grid, entities: Vec<Entity>) -> Self {
        let mut level = Self {
            grid,
            entities,
            player: None,
            status: Status::Running,
            finish_delay: FINISH_DELAY,
            next_id: 1,
        };

        for index in 0..level.entities.len() {
            let id = level.next_entity_id();
            level.entities[index].set_id(id);
        }
        level.player = level
            .entities
            .iter()
            .find(|e| e.kind() == EntityKind::Player)
            .and_then(Entity::id);

        if level.player.is_none() {
            log::warn!("Level has no player");
        }
        log::info!(
            "Level {}x{} with {} entities ({} coins)",
            level.width(),
            level.height(),
            level.entities.len(),
            level.count(EntityKind::Coin)
        );
        level
    }

    /// Override the grace period (builder style)
    pub fn with_finish_delay(mut self, finish_delay: f32) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Grid and entities borrowed together, for updating entities against the grid
    pub(crate) fn split_mut(&mut self) -> (&Grid, &mut [Entity]) {
        (&self.grid, &mut self.entities)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == Some(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == Some(id))
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entity(self.player?)
    }

    /// Mutable player access for external movement control
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player?;
        self.entity_mut(id)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Outcome decided and grace period elapsed
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() && self.finish_delay < 0.0
    }

    /// First entity, in list order, overlapping `probe`
    pub fn actor_at(&self, probe: &Entity) -> Option<&Entity> {
        self.entities.iter().find(|e| e.intersects(probe))
    }

    /// First obstacle touched by a box at `pos` with `size`
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        self.grid.obstacle_at(pos, size)
    }

    /// Remove an entity, keeping the order of the rest; unknown ids are ignored
    pub fn remove_actor(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == Some(id))?;
        Some(self.entities.remove(index))
    }

    /// True when no entity of `kind` is left
    pub fn no_more_actors(&self, kind: EntityKind) -> bool {
        !self.entities.iter().any(|e| e.kind() == kind)
    }

    /// Number of entities of `kind`
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    /// Apply the win/loss rule for a player contact
    ///
    /// Lava and any fireball lose the level. A coin is collected only when
    /// `entity` names a coin; collecting the last one wins. Anything else,
    /// and any call after the outcome is decided, does nothing.
    pub fn player_touched(&mut self, touched: impl Into<Touched>, entity: Option<EntityId>) {
        if self.status.is_terminal() {
            return;
        }

        match touched.into() {
            touched @ Touched::Obstacle(Obstacle::Lava) => self.finish(Status::Lost, touched),
            touched @ Touched::Entity(kind) if kind.is_fireball() => {
                self.finish(Status::Lost, touched)
            }
            touched @ Touched::Entity(EntityKind::Coin) => {
                let Some(id) = entity else {
                    return;
                };
                if self.entity(id).map(Entity::kind) != Some(EntityKind::Coin) {
                    return;
                }
                self.remove_actor(id);
                log::debug!(
                    "Collected coin {}, {} left",
                    id,
                    self.count(EntityKind::Coin)
                );
                if self.no_more_actors(EntityKind::Coin) {
                    self.finish(Status::Won, touched);
                }
            }
            _ => {}
        }
    }

    fn finish(&mut self, status: Status, cause: Touched) {
        log::info!("Level {:?} (touched {})", status, cause);
        self.status = status;
    }
}
