//! Input snapshot
//!
//! The host owns keyboard capture; the simulation only ever sees which keys are
//! held right now and which direction was pressed last.

use serde::{Deserialize, Serialize};

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step in canvas coordinates (y grows downward)
    pub fn unit(self) -> glam::Vec2 {
        match self {
            Direction::Up => glam::Vec2::new(0.0, -1.0),
            Direction::Down => glam::Vec2::new(0.0, 1.0),
            Direction::Left => glam::Vec2::new(-1.0, 0.0),
            Direction::Right => glam::Vec2::new(1.0, 0.0),
        }
    }
}

/// A key the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Dir(Direction),
    /// Attack
    Action,
}

impl Key {
    /// Map a DOM-style key name to a game key
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name {
            "ArrowUp" => Some(Key::Dir(Direction::Up)),
            "ArrowDown" => Some(Key::Dir(Direction::Down)),
            "ArrowLeft" => Some(Key::Dir(Direction::Left)),
            "ArrowRight" => Some(Key::Dir(Direction::Right)),
            "Control" => Some(Key::Action),
            _ => None,
        }
    }
}

/// Input state for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Keys currently held, in press order
    held: Vec<Key>,
    /// Most recently pressed direction (stays set after release)
    pub last_direction: Option<Direction>,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down
    pub fn press(&mut self, key: Key) {
        if !self.held.contains(&key) {
            self.held.push(key);
        }
        if let Key::Dir(dir) = key {
            self.last_direction = Some(dir);
        }
    }

    /// Key went up
    pub fn release(&mut self, key: Key) {
        self.held.retain(|k| *k != key);
    }

    /// Builder form of `press`, handy for scripted input
    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_dir_held(&self, dir: Direction) -> bool {
        self.is_held(Key::Dir(dir))
    }

    pub fn action_held(&self) -> bool {
        self.is_held(Key::Action)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    pub fn held(&self) -> &[Key] {
        &self.held
    }

    /// Direction held and also the last one pressed: the one the camera follows
    pub fn steering(&self, dir: Direction) -> bool {
        self.is_dir_held(dir) && self.last_direction == Some(dir)
    }
}
