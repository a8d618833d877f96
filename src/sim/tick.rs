//! Simulation tick
//!
//! One tick moves every non-player entity, then resolves the player's
//! contacts against the updated positions, then counts down the finish
//! delay once the outcome is known. Player movement is left to the caller,
//! who can reposition the player through [`Level::player_mut`] between ticks.

use super::entity::EntityKind;
use super::level::{Level, Status, Touched};
use crate::error::Result;
use crate::settings::Settings;

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Contacts reported to the level this tick, in resolution order
    pub contacts: Vec<Touched>,
    pub status: Status,
    /// `Level::is_finished` after the tick
    pub finished: bool,
}

/// Run every non-player entity's motion rule
pub fn advance_entities(level: &mut Level, dt: f32) -> Result<()> {
    let (grid, entities) = level.split_mut();
    for entity in entities
        .iter_mut()
        .filter(|e| e.kind() != EntityKind::Player)
    {
        entity.update(dt, grid)?;
    }
    Ok(())
}

/// Report the player's obstacle contact, then every entity overlapping it
pub fn resolve_contacts(level: &mut Level) -> Result<Vec<Touched>> {
    let Some((pos, size)) = level.player().map(|p| (p.pos, p.size)) else {
        return Ok(Vec::new());
    };
    let mut contacts = Vec::new();

    if let Some(obstacle) = level.obstacle_at(pos, size)? {
        level.player_touched(obstacle, None);
        contacts.push(obstacle.into());
    }

    let touching: Vec<_> = match level.player() {
        Some(player) => level
            .entities()
            .iter()
            .filter(|e| e.intersects(player))
            .map(|e| (e.kind(), e.id()))
            .collect(),
        None => Vec::new(),
    };
    for (kind, id) in touching {
        level.player_touched(kind, id);
        contacts.push(kind.into());
    }

    Ok(contacts)
}

/// Advance the level by one fixed step
pub fn tick(level: &mut Level, dt: f32) -> Result<TickReport> {
    advance_entities(level, dt)?;
    let contacts = resolve_contacts(level)?;

    if level.status().is_terminal() {
        level.finish_delay -= dt;
    }

    let report = TickReport {
        contacts,
        status: level.status(),
        finished: level.is_finished(),
    };
    log::trace!("tick {:?}", report);
    Ok(report)
}

/// Tick until the level is finished or the tick budget is spent
pub fn run(level: &mut Level, settings: &Settings) -> Result<Status> {
    for ticks in 1..=settings.max_ticks {
        if tick(level, settings.step)?.finished {
            log::info!("Level finished after {} ticks: {:?}", ticks, level.status());
            return Ok(level.status());
        }
    }
    log::info!(
        "Tick budget of {} spent, status {:?}",
        settings.max_ticks,
        level.status()
    );
    Ok(level.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;
    use crate::sim::grid::{Grid, Obstacle};
    use crate::sim::parser::LevelParser;
    use crate::sim::vector::Vector;

    fn open_grid(width: usize, height: usize) -> Grid {
        Grid::new(vec![vec![None; width]; height])
    }

    #[test]
    fn test_fireball_reaches_player() {
        let mut level = LevelParser::standard(1).parse(&[
            "          ",
            "=  @      ",
            "          ",
            "xxxxxxxxxx",
        ]);

        // Fireball edge meets the player after four steps without overlapping
        for _ in 0..4 {
            let report = tick(&mut level, 0.25).unwrap();
            assert_eq!(report.status, Status::Running);
        }

        // Moved first, then checked against the new position
        let report = tick(&mut level, 0.25).unwrap();
        assert_eq!(report.status, Status::Lost);
        assert_eq!(
            report.contacts,
            vec![Touched::Entity(EntityKind::HorizontalFireball)]
        );
    }

    #[test]
    fn test_player_does_not_move_itself() {
        let mut level = Level::new(
            open_grid(5, 5),
            vec![Entity::player(Vector::new(1.0, 1.0)).with_vel(Vector::new(3.0, 0.0))],
        );
        tick(&mut level, 1.0).unwrap();
        assert_eq!(level.player().unwrap().pos, Vector::new(1.0, 0.5));
    }

    #[test]
    fn test_collect_coin_then_finish_after_delay() {
        let mut level = Level::new(
            open_grid(5, 5),
            vec![
                Entity::player(Vector::new(1.0, 1.0)),
                Entity::coin_with_phase(Vector::new(1.0, 1.0), 0.0),
            ],
        );

        let report = tick(&mut level, 0.5).unwrap();
        assert_eq!(report.status, Status::Won);
        assert_eq!(report.contacts, vec![Touched::Entity(EntityKind::Coin)]);
        assert!(!report.finished);
        assert_eq!(level.finish_delay, 0.5);

        assert!(!tick(&mut level, 0.5).unwrap().finished);
        assert!(tick(&mut level, 0.5).unwrap().finished);
    }

    #[test]
    fn test_every_overlapping_entity_is_reported() {
        let mut level = Level::new(
            open_grid(5, 5),
            vec![
                Entity::coin_with_phase(Vector::new(1.0, 1.0), 0.0),
                Entity::player(Vector::new(1.0, 1.0)),
                Entity::coin_with_phase(Vector::new(1.0, 0.0), 0.0),
            ],
        );
        let report = tick(&mut level, 0.1).unwrap();
        assert_eq!(report.contacts.len(), 2);
        assert_eq!(report.status, Status::Won);
        assert!(level.no_more_actors(EntityKind::Coin));
    }

    #[test]
    fn test_player_in_lava() {
        let mut level = LevelParser::standard(1).parse(&["   ", " @ ", " ! ", "xxx"]);
        let report = tick(&mut level, 0.1).unwrap();
        assert_eq!(report.contacts, vec![Touched::Obstacle(Obstacle::Lava)]);
        assert_eq!(report.status, Status::Lost);
    }

    #[test]
    fn test_wall_contact_keeps_running() {
        let mut level = LevelParser::standard(1).parse(&["   ", " @ ", " x ", "   "]);
        let report = tick(&mut level, 0.1).unwrap();
        assert_eq!(report.contacts, vec![Touched::Obstacle(Obstacle::Wall)]);
        assert_eq!(report.status, Status::Running);
    }

    #[test]
    fn test_no_player_no_contacts() {
        let mut level = Level::new(
            open_grid(3, 3),
            vec![Entity::coin_with_phase(Vector::new(1.0, 1.0), 0.0)],
        );
        let report = tick(&mut level, 1.0).unwrap();
        assert!(report.contacts.is_empty());
        assert_eq!(report.status, Status::Running);
    }

    #[test]
    fn test_run_until_finished() {
        let mut level = Level::new(
            open_grid(5, 5),
            vec![
                Entity::player(Vector::new(1.0, 1.0)),
                Entity::coin_with_phase(Vector::new(1.0, 1.0), 0.0),
            ],
        );
        let settings = Settings {
            step: 0.5,
            max_ticks: 10,
            ..Settings::default()
        };
        assert_eq!(run(&mut level, &settings).unwrap(), Status::Won);
        assert!(level.is_finished());
    }

    #[test]
    fn test_run_spends_budget_on_coinless_level() {
        let mut level = Level::new(
            open_grid(5, 5),
            vec![Entity::player(Vector::new(1.0, 1.0))],
        );
        let settings = Settings {
            max_ticks: 5,
            ..Settings::default()
        };
        assert_eq!(run(&mut level, &settings).unwrap(), Status::Running);
        assert!(!level.is_finished());
    }

    #[test]
    fn test_non_finite_motion_is_an_error() {
        let mut level = Level::new(
            open_grid(5, 5),
            vec![Entity::fireball(Vector::ZERO, Vector::new(f32::NAN, 0.0))],
        );
        assert!(matches!(
            tick(&mut level, 1.0),
            Err(crate::SimError::TypeKind { .. })
        ));
    }
}
