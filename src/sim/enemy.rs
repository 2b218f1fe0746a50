//! Slimes: wander state machine and contact with the player
//!
//! Each slime alternates between sitting still and hopping sideways. The
//! interval is rolled once per slime. Wandering direction flips every time it
//! starts to wander, so a slime drifts right, then left, then right again and
//! stays roughly where it spawned.

use glam::Vec2;
use rand::Rng;

use super::aabb::Aabb;
use super::collision::{feet_anchor, in_proximity, within_reach};
use super::input::TickInput;
use super::player::Player;
use super::state::Movable;
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal wander direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WanderState {
    Idle,
    WanderRight,
    WanderLeft,
}

/// Sprite rows on the slime sheet
pub mod rows {
    pub const IDLE: u32 = 1;
    pub const WANDER_RIGHT: u32 = 2;
    /// Resting pose after a hop to the right
    pub const IDLE_AFTER_RIGHT: u32 = 6;
    pub const WANDER_LEFT: u32 = 7;
}

/// Roll a wander interval in `[min, max)`, never below one update
pub fn roll_wander_interval<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    let interval = min + rng.random::<f32>() * (max - min);
    if interval.is_finite() {
        interval.max(1.0)
    } else {
        1.0
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub bounds: Aabb,
    pub wander: WanderState,
    /// Direction of the most recent wander, if it ever wandered
    pub heading: Option<Heading>,
    /// Throttled updates since the last toggle
    pub wander_timer: u32,
    pub wander_interval: f32,
    pub frame_x: u32,
    pub frame_y: u32,
    pub max_frame_x: u32,
    pub marked_for_deletion: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, wander_interval: f32) -> Self {
        Self {
            id,
            bounds: Aabb::from_pos_size(pos, Vec2::splat(SLIME_SIZE)),
            wander: WanderState::Idle,
            heading: None,
            wander_timer: 0,
            wander_interval: wander_interval.max(1.0),
            frame_x: 0,
            frame_y: rows::IDLE,
            max_frame_x: SLIME_MAX_FRAME,
            marked_for_deletion: false,
        }
    }

    pub fn is_wandering(&self) -> bool {
        self.wander != WanderState::Idle
    }

    /// Throttled step: animation, wander timer, and one hop if wandering
    pub fn update(&mut self, speed: f32) {
        if self.frame_x < self.max_frame_x {
            self.frame_x += 1;
        } else {
            self.frame_x = 0;
        }

        if (self.wander_timer as f32) < self.wander_interval {
            self.wander_timer += 1;
        } else {
            self.wander_timer = 0;
            self.toggle_wander();
        }

        match self.wander {
            WanderState::WanderRight => {
                self.bounds.pos.x += speed;
                self.frame_y = rows::WANDER_RIGHT;
                self.max_frame_x = SLIME_WANDER_MAX_FRAME;
            }
            WanderState::WanderLeft => {
                self.bounds.pos.x -= speed;
                self.frame_y = rows::WANDER_LEFT;
                self.max_frame_x = SLIME_WANDER_MAX_FRAME;
            }
            WanderState::Idle => {}
        }
    }

    fn toggle_wander(&mut self) {
        if self.is_wandering() {
            self.wander = WanderState::Idle;
            let idle_row = match self.frame_y {
                rows::WANDER_RIGHT => Some(rows::IDLE_AFTER_RIGHT),
                rows::WANDER_LEFT => Some(rows::IDLE),
                _ => None,
            };
            if let Some(row) = idle_row {
                self.frame_y = row;
                self.max_frame_x = SLIME_MAX_FRAME;
            }
        } else {
            let heading = match self.heading {
                Some(Heading::Right) => Heading::Left,
                _ => Heading::Right,
            };
            self.heading = Some(heading);
            self.wander = match heading {
                Heading::Right => WanderState::WanderRight,
                Heading::Left => WanderState::WanderLeft,
            };
        }
    }

    /// Freeze in place; the heading is kept so the next wander still alternates
    pub fn stop(&mut self) {
        self.wander = WanderState::Idle;
    }

    /// Returns true only the first time
    pub fn mark_for_deletion(&mut self) -> bool {
        let newly = !self.marked_for_deletion;
        self.marked_for_deletion = true;
        newly
    }
}

impl Movable for Enemy {
    fn translate(&mut self, delta: Vec2) {
        self.bounds.pos += delta;
    }
}

/// Check every live slime against the player
///
/// Slimes touching the player's feet stop wandering and raise the player's
/// collision alert. With the action key held, each touching slime the player
/// is facing is marked for deletion. Returns the indices of slimes defeated by
/// this call.
pub fn resolve_contacts(
    player: &mut Player,
    enemies: &mut [Enemy],
    input: &TickInput,
    tuning: &Tuning,
) -> Vec<usize> {
    player.collision_alert = false;
    let anchor = feet_anchor(&player.bounds);
    let player_center = player.bounds.center();
    let strike = input.last_direction.filter(|_| input.action_held());

    let mut defeated = Vec::new();
    for (idx, enemy) in enemies.iter_mut().enumerate() {
        if enemy.marked_for_deletion {
            continue;
        }
        let enemy_center = enemy.bounds.center();
        if !in_proximity(anchor, enemy_center, tuning.proximity_radius) {
            continue;
        }
        player.collision_alert = true;
        enemy.stop();

        if let Some(facing) = strike {
            if within_reach(player_center, enemy_center, facing, tuning.reach(facing))
                && enemy.mark_for_deletion()
            {
                log::debug!("Slime {} defeated facing {:?}", enemy.id, facing);
                defeated.push(idx);
            }
        }
    }
    defeated
}
