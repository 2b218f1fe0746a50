//! Data-driven game balance
//!
//! Every constant the simulation reads comes through `Tuning`. Defaults match
//! `crate::consts`; a JSON file can override any subset of fields.
//!
//! Movement and AI cadence are counted in host frames, not seconds: `game_speed`
//! is world units per frame and `refresh_threshold` is a frame count. On a
//! display faster than 60 Hz the game runs faster; retune both together.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::input::Direction;

/// Error loading a tuning file
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(String),
    /// File was not valid tuning JSON
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Game balance and layout values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Map image offset relative to a centered canvas
    pub map_origin_x: f32,
    pub map_origin_y: f32,
    pub cell_size: f32,
    /// Cell code that marks a wall in the collision map
    pub solid_cell: u32,

    // === Pacing ===
    /// World units per scroll/wander step
    pub game_speed: f32,
    /// Entity updates fire once the refresh counter exceeds this
    pub refresh_threshold: u32,

    // === Slimes ===
    pub enemy_population: usize,
    pub wander_interval_min: f32,
    pub wander_interval_max: f32,
    pub spawn_offset: f32,
    pub spawn_spread: f32,

    // === Combat ===
    pub proximity_radius: f32,
    pub reach_up: f32,
    pub reach_down: f32,
    pub reach_left: f32,
    pub reach_right: f32,
    /// Movement gating lookahead
    pub lookahead: f32,

    /// Run seed for spawn positions and wander intervals
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            map_origin_x: MAP_ORIGIN_X,
            map_origin_y: MAP_ORIGIN_Y,
            cell_size: CELL_SIZE,
            solid_cell: SOLID_CELL,

            game_speed: GAME_SPEED,
            refresh_threshold: REFRESH_THRESHOLD,

            enemy_population: ENEMY_POPULATION,
            wander_interval_min: WANDER_INTERVAL_MIN,
            wander_interval_max: WANDER_INTERVAL_MAX,
            spawn_offset: SPAWN_OFFSET,
            spawn_spread: SPAWN_SPREAD,

            proximity_radius: PROXIMITY_RADIUS,
            reach_up: REACH_UP,
            reach_down: REACH_DOWN,
            reach_left: REACH_LEFT,
            reach_right: REACH_RIGHT,
            lookahead: LOOKAHEAD,

            seed: 0x5EED_51AE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp values the simulation can't run with
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if !(self.cell_size > 0.0) {
            log::warn!("cell_size {} is not positive, using {}", self.cell_size, defaults.cell_size);
            self.cell_size = defaults.cell_size;
        }
        if !self.game_speed.is_finite() || self.game_speed < 0.0 {
            log::warn!("game_speed {} is invalid, using {}", self.game_speed, defaults.game_speed);
            self.game_speed = defaults.game_speed;
        }
        // A slime must idle or wander for at least one update
        if !(self.wander_interval_min >= 1.0) {
            log::warn!("wander_interval_min {} clamped to 1", self.wander_interval_min);
            self.wander_interval_min = 1.0;
        }
        if !(self.wander_interval_max > self.wander_interval_min) {
            log::warn!(
                "wander_interval_max {} must exceed min {}, using {}",
                self.wander_interval_max,
                self.wander_interval_min,
                self.wander_interval_min + 1.0
            );
            self.wander_interval_max = self.wander_interval_min + 1.0;
        }
        if !(self.spawn_spread >= 0.0) {
            self.spawn_spread = 0.0;
        }
    }

    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Where the map's top-left cell lands in world space
    pub fn world_origin(&self) -> Vec2 {
        crate::world_origin(self.canvas(), Vec2::new(self.map_origin_x, self.map_origin_y))
    }

    /// Attack reach toward the given facing
    pub fn reach(&self, facing: Direction) -> f32 {
        match facing {
            Direction::Up => self.reach_up,
            Direction::Down => self.reach_down,
            Direction::Left => self.reach_left,
            Direction::Right => self.reach_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.game_speed, 3.0);
        assert_eq!(t.refresh_threshold, 7);
        assert_eq!(t.enemy_population, 5);
        assert_eq!(t.solid_cell, 1025);
        assert_eq!(t.reach(Direction::Down), 80.0);
        assert_eq!(t.reach(Direction::Up), 60.0);
    }

    #[test]
    fn test_json_round_trip() {
        let t = Tuning::default();
        let json = t.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "game_speed": 5.0, "enemy_population": 2 }"#).unwrap();
        assert_eq!(t.game_speed, 5.0);
        assert_eq!(t.enemy_population, 2);
        assert_eq!(t.proximity_radius, PROXIMITY_RADIUS);
        assert_eq!(t.cell_size, CELL_SIZE);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validate_clamps_wander_interval() {
        let t = Tuning::from_json(r#"{ "wander_interval_min": -4.0, "wander_interval_max": 0.0 }"#)
            .unwrap();
        assert_eq!(t.wander_interval_min, 1.0);
        assert!(t.wander_interval_max > t.wander_interval_min);
    }

    #[test]
    fn test_world_origin() {
        let t = Tuning::default();
        assert_eq!(t.world_origin(), Vec2::new(-868.0, -1374.0));
    }
}
