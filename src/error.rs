//! Startup errors
//!
//! The simulation itself has no recoverable error surface; everything that can
//! fail happens while loading the map or the tuning file, before the first tick.

use crate::sim::obstacles::MapError;
use crate::tuning::ConfigError;

/// Any error that prevents a game from starting
#[derive(Debug)]
pub enum GameError {
    /// Collision map was missing or malformed
    Map(MapError),
    /// Tuning file could not be read or parsed
    Config(ConfigError),
    /// A map file could not be read
    Io(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Map(e) => write!(f, "Map error: {}", e),
            GameError::Config(e) => write!(f, "Config error: {}", e),
            GameError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Map(e) => Some(e),
            GameError::Config(e) => Some(e),
            GameError::Io(_) => None,
        }
    }
}

impl From<MapError> for GameError {
    fn from(e: MapError) -> Self {
        GameError::Map(e)
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::Config(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e.to_string())
    }
}
