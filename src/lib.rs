//! Slime Grove - a top-down slime hunting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, entity state machines, tick)
//! - `renderer`: Back-to-front draw list for the host canvas
//! - `tuning`: Data-driven game balance
//! - `error`: Startup errors (bad maps, bad tuning files)

pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (world units == screen pixels)
    pub const CANVAS_WIDTH: f32 = 1600.0;
    pub const CANVAS_HEIGHT: f32 = 900.0;

    /// Offset of the map image's top-left corner relative to a centered canvas
    pub const MAP_ORIGIN_X: f32 = -1668.0;
    pub const MAP_ORIGIN_Y: f32 = -1824.0;

    /// Collision map
    pub const CELL_SIZE: f32 = 48.0;
    pub const SOLID_CELL: u32 = 1025;

    /// World units the camera scrolls (or a slime walks) per step
    pub const GAME_SPEED: f32 = 3.0;
    /// Entity updates fire once the refresh counter exceeds this
    pub const REFRESH_THRESHOLD: u32 = 7;

    /// Player sprite: 48x48 cells drawn at 96x96
    pub const PLAYER_SPRITE: f32 = 48.0;
    pub const PLAYER_SIZE: f32 = 96.0;
    pub const PLAYER_MAX_FRAME: u32 = 5;
    pub const PLAYER_ATTACK_MAX_FRAME: u32 = 3;

    /// Feet hitbox used for movement gating
    pub const FEET_INSET_X: f32 = 30.0;
    pub const FEET_INSET_Y: f32 = 60.0;
    pub const FEET_SHRINK_W: f32 = 60.0;
    pub const FEET_SHRINK_H: f32 = 70.0;
    /// How far ahead (along the travel direction) movement gating looks
    pub const LOOKAHEAD: f32 = 3.0;

    /// Slime sprite: 32x32 cells drawn at 64x64
    pub const SLIME_SPRITE: f32 = 32.0;
    pub const SLIME_SIZE: f32 = 64.0;
    pub const SLIME_MAX_FRAME: u32 = 5;
    pub const SLIME_WANDER_MAX_FRAME: u32 = 6;
    pub const VANISH_MAX_FRAME: u32 = 4;

    /// Live slimes the spawner tops up to
    pub const ENEMY_POPULATION: usize = 5;
    /// Feet-to-slime distance that counts as contact
    pub const PROXIMITY_RADIUS: f32 = 70.0;
    /// Attack reach per facing (untuned: down reaches further than the rest)
    pub const REACH_UP: f32 = 60.0;
    pub const REACH_DOWN: f32 = 80.0;
    pub const REACH_LEFT: f32 = 60.0;
    pub const REACH_RIGHT: f32 = 60.0;

    /// Wander interval bounds in throttled updates
    pub const WANDER_INTERVAL_MIN: f32 = 15.0;
    pub const WANDER_INTERVAL_MAX: f32 = 30.0;

    /// Spawn band, measured from the background's top-left corner
    pub const SPAWN_OFFSET: f32 = 1200.0;
    pub const SPAWN_SPREAD: f32 = 1600.0;
}

/// Center of a box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size / 2.0
}

/// World origin for a canvas of the given size: where the map's (0, 0) lands
#[inline]
pub fn world_origin(canvas: Vec2, map_origin: Vec2) -> Vec2 {
    map_origin + canvas / 2.0
}
