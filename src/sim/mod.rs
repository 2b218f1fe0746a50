//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count pacing only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod enemy;
pub mod input;
pub mod obstacles;
pub mod player;
pub mod state;
pub mod tick;
pub mod vanish;

pub use aabb::Aabb;
pub use enemy::{Enemy, Heading, WanderState, resolve_contacts};
pub use input::{Direction, Key, TickInput};
pub use obstacles::{CollisionMap, MapError, Obstacle, build_obstacles};
pub use player::{Player, PlayerMode};
pub use state::{GameEvent, GamePhase, GameState, Movable, SimFault, StaticLayer};
pub use tick::tick;
pub use vanish::VanishEffect;
