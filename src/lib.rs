//! Lava Run - a tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, obstacle grid, entities, level state)
//! - `settings`: Driver configuration (timestep, seed, tick budget)
//! - `error`: Error type shared by every fallible operation

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Default tick budget for a headless run
    pub const MAX_TICKS: u32 = 60 * 60;

    /// Grace period after the outcome is decided, before the level counts as finished
    pub const FINISH_DELAY: f32 = 1.0;

    /// Player spawn offset and box
    pub const PLAYER_OFFSET: (f32, f32) = (0.0, -0.5);
    pub const PLAYER_SIZE: (f32, f32) = (0.8, 1.5);

    /// Coin spawn offset and box
    pub const COIN_OFFSET: (f32, f32) = (0.2, 0.1);
    pub const COIN_SIZE: (f32, f32) = (0.6, 0.6);
    /// Coin bob phase speed (radians per second)
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    /// Coin bob amplitude (tiles)
    pub const COIN_SPRING_DIST: f32 = 0.07;

    /// Fireball speeds (tiles per second)
    pub const HORIZONTAL_FIREBALL_SPEED: f32 = 2.0;
    pub const VERTICAL_FIREBALL_SPEED: f32 = 2.0;
    pub const FIRE_RAIN_SPEED: f32 = 3.0;
}

/// Build a vector from one of the `(x, y)` tuples in [`consts`]
#[inline]
pub fn vec2(pair: (f32, f32)) -> Vec2 {
    Vec2::new(pair.0, pair.1)
}
