//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`. The player is the
//! camera: its box stays centered while every other entity is translated.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::{Enemy, roll_wander_interval};
use super::obstacles::{CollisionMap, Obstacle, build_obstacles};
use super::player::Player;
use super::vanish::VanishEffect;
use crate::error::GameError;
use crate::tuning::Tuning;

pub const BACKGROUND_IMAGE: &str = "assets/img/gamebackground.png";
pub const FOREGROUND_IMAGE: &str = "assets/img/foreground.png";

/// Anything the camera scrolls
pub trait Movable {
    fn translate(&mut self, delta: Vec2);
}

/// Whether the loop is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// An invariant broke; ticks are ignored from here on
    Halted,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    EnemyDefeated { enemy_id: u32, effect_id: u32 },
    VanishCompleted { id: u32 },
}

/// A full-map image layer (background art, or the foreground drawn over sprites)
#[derive(Debug, Clone, PartialEq)]
pub struct StaticLayer {
    pub image: &'static str,
    pub pos: Vec2,
}

impl Movable for StaticLayer {
    fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// Broken invariant found after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimFault {
    Overpopulated { live: usize, cap: usize },
    StaleEntity { id: u32 },
    BadWanderInterval { id: u32, interval: f32 },
}

impl std::fmt::Display for SimFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimFault::Overpopulated { live, cap } => {
                write!(f, "{} live slimes exceeds cap of {}", live, cap)
            }
            SimFault::StaleEntity { id } => {
                write!(f, "entity {} survived compaction while marked for deletion", id)
            }
            SimFault::BadWanderInterval { id, interval } => {
                write!(f, "slime {} has wander interval {}", id, interval)
            }
        }
    }
}

impl std::error::Error for SimFault {}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub background: StaticLayer,
    pub foreground: StaticLayer,
    pub obstacles: Vec<Obstacle>,
    pub player: Player,
    /// Live slimes (ascending id)
    pub enemies: Vec<Enemy>,
    /// Vanish effects still playing (ascending id)
    pub vanishing: Vec<VanishEffect>,
    /// Frames since the last throttled update
    pub refresh_counter: u32,
    /// Ticks since start
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    score: u64,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Build the world from tuning and a validated collision map
    pub fn new(tuning: Tuning, map: &CollisionMap) -> Self {
        let origin = tuning.world_origin();
        let obstacles = build_obstacles(map, tuning.solid_cell, tuning.cell_size, origin);
        log::info!(
            "Built {} obstacles from {}x{} collision map",
            obstacles.len(),
            map.columns(),
            map.rows()
        );

        Self {
            phase: GamePhase::Running,
            background: StaticLayer {
                image: BACKGROUND_IMAGE,
                pos: origin,
            },
            foreground: StaticLayer {
                image: FOREGROUND_IMAGE,
                pos: origin,
            },
            obstacles,
            player: Player::new(tuning.canvas()),
            enemies: Vec::new(),
            vanishing: Vec::new(),
            refresh_counter: 0,
            time_ticks: 0,
            events: Vec::new(),
            score: 0,
            rng: Pcg32::seed_from_u64(tuning.seed),
            next_id: 1,
            tuning,
        }
    }

    /// Parse a JSON collision map and build the world from it
    pub fn from_map_json(tuning: Tuning, json: &str) -> Result<Self, GameError> {
        let map = CollisionMap::from_json(json)?;
        Ok(Self::new(tuning, &map))
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
        log::debug!("Score: {}", self.score);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// ID the next spawned entity will get; everything alive has a smaller one
    pub fn peek_next_id(&self) -> u32 {
        self.next_id
    }

    /// Drop a slime somewhere in the spawn band, measured from the map's corner
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let t = &self.tuning;
        let spread = t.spawn_spread;
        let pos = self.background.pos
            + Vec2::new(
                self.rng.random::<f32>() * spread + t.spawn_offset,
                self.rng.random::<f32>() * spread + t.spawn_offset,
            );
        let interval = roll_wander_interval(&mut self.rng, t.wander_interval_min, t.wander_interval_max);
        log::debug!("Spawned slime {} at ({:.0}, {:.0}), wander every {:.1}", id, pos.x, pos.y, interval);
        self.enemies.push(Enemy::new(id, pos, interval));
        id
    }

    /// Spawn a vanish effect where the slime at `idx` stands
    pub fn spawn_vanish(&mut self, idx: usize) -> u32 {
        let id = self.next_entity_id();
        let effect = VanishEffect::from_enemy(id, &self.enemies[idx]);
        self.vanishing.push(effect);
        id
    }

    /// Everything the camera scrolls, excluding slimes and effects born at or after `frontier`
    pub fn movables_mut(&mut self, frontier: u32) -> impl Iterator<Item = &mut dyn Movable> + '_ {
        let layers = [&mut self.background, &mut self.foreground]
            .into_iter()
            .map(|l| l as &mut dyn Movable);
        let obstacles = self.obstacles.iter_mut().map(|o| o as &mut dyn Movable);
        let enemies = self
            .enemies
            .iter_mut()
            .filter(move |e| e.id < frontier)
            .map(|e| e as &mut dyn Movable);
        let vanishing = self
            .vanishing
            .iter_mut()
            .filter(move |v| v.id < frontier)
            .map(|v| v as &mut dyn Movable);
        layers.chain(obstacles).chain(enemies).chain(vanishing)
    }

    /// Scroll the world by `delta` (the player stays put)
    pub fn translate_world(&mut self, delta: Vec2, frontier: u32) {
        for movable in self.movables_mut(frontier) {
            movable.translate(delta);
        }
    }

    /// Drop slimes and effects marked for deletion
    pub fn compact(&mut self) {
        self.enemies.retain(|e| !e.marked_for_deletion);
        self.vanishing.retain(|v| !v.marked_for_deletion);
    }

    /// Check the invariants a tick must leave behind
    pub fn verify(&self) -> Result<(), SimFault> {
        let cap = self.tuning.enemy_population;
        if self.enemies.len() > cap {
            return Err(SimFault::Overpopulated {
                live: self.enemies.len(),
                cap,
            });
        }
        for enemy in &self.enemies {
            if enemy.marked_for_deletion {
                return Err(SimFault::StaleEntity { id: enemy.id });
            }
            if !(enemy.wander_interval >= 1.0) {
                return Err(SimFault::BadWanderInterval {
                    id: enemy.id,
                    interval: enemy.wander_interval,
                });
            }
        }
        if let Some(fx) = self.vanishing.iter().find(|v| v.marked_for_deletion) {
            return Err(SimFault::StaleEntity { id: fx.id });
        }
        Ok(())
    }

    /// Stop the loop after a fault
    pub fn halt(&mut self, fault: &SimFault) {
        log::error!("Simulation halted at tick {}: {}", self.time_ticks, fault);
        self.phase = GamePhase::Halted;
    }
}
