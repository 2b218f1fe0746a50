//! The player: camera anchor, movement gating and attack mode
//!
//! The player's box never moves on screen. Walking scrolls the rest of the world
//! the other way (see `tick`), so the player only tracks whether it is allowed
//! to move this frame and which animation to show.

use glam::Vec2;

use super::aabb::Aabb;
use super::collision::{feet_hitbox, first_blocker};
use super::enemy::Enemy;
use super::input::{Direction, TickInput};
use super::obstacles::Obstacle;
use crate::consts::*;

/// What the player is doing, for animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Idle,
    Moving,
    Attacking,
}

/// Order in which held directions are checked for blocking
const GATING_ORDER: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

/// Sprite sheet row for a facing and mode
pub fn animation_row(facing: Direction, mode: PlayerMode) -> u32 {
    match (mode, facing) {
        (PlayerMode::Idle, Direction::Left) => 0,
        (PlayerMode::Idle, Direction::Down) => 2,
        (PlayerMode::Idle, Direction::Right) => 3,
        (PlayerMode::Idle, Direction::Up) => 4,
        (PlayerMode::Moving, Direction::Left) => 1,
        (PlayerMode::Moving, Direction::Down) => 5,
        (PlayerMode::Moving, Direction::Right) => 6,
        (PlayerMode::Moving, Direction::Up) => 7,
        (PlayerMode::Attacking, Direction::Down) => 8,
        (PlayerMode::Attacking, Direction::Right) => 9,
        (PlayerMode::Attacking, Direction::Left) => 10,
        (PlayerMode::Attacking, Direction::Up) => 11,
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub bounds: Aabb,
    pub facing: Direction,
    /// Animation column, cycles 0..=max_frame_x
    pub frame_x: u32,
    /// Animation row, see `animation_row`
    pub frame_y: u32,
    pub max_frame_x: u32,
    pub attack: bool,
    /// Cleared when the next step would walk into something
    pub moving: bool,
    /// A slime is touching the player's feet
    pub collision_alert: bool,
}

impl Player {
    /// Player centered on a canvas of the given size
    pub fn new(canvas: Vec2) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        let facing = Direction::Down;
        Self {
            bounds: Aabb::from_pos_size(canvas / 2.0 - size / 2.0, size),
            facing,
            frame_x: 0,
            frame_y: animation_row(facing, PlayerMode::Idle),
            max_frame_x: PLAYER_MAX_FRAME,
            attack: false,
            moving: true,
            collision_alert: false,
        }
    }

    /// Mode for this frame's input; the action key wins over walking
    pub fn mode(&self, input: &TickInput) -> PlayerMode {
        if input.action_held() {
            PlayerMode::Attacking
        } else if input.any_held() && self.moving {
            PlayerMode::Moving
        } else {
            PlayerMode::Idle
        }
    }

    /// Face the last pressed direction, held or not
    pub fn face(&mut self, input: &TickInput) {
        if let Some(dir) = input.last_direction {
            self.facing = dir;
        }
    }

    /// Throttled animation step
    pub fn update(&mut self, input: &TickInput) {
        self.max_frame_x = frame_cap(input);
        if self.frame_x < self.max_frame_x {
            self.frame_x += 1;
        } else {
            self.frame_x = 0;
        }
        self.face(input);
        self.frame_y = animation_row(self.facing, self.mode(input));
    }

    /// Gate movement for this frame against walls and live slimes
    ///
    /// Returns true when the step is blocked.
    pub fn check_collision(
        &mut self,
        input: &TickInput,
        obstacles: &[Obstacle],
        enemies: &[Enemy],
        lookahead: f32,
    ) -> bool {
        self.moving = true;
        let feet = feet_hitbox(&self.bounds);

        for dir in GATING_ORDER {
            if !input.is_dir_held(dir) {
                continue;
            }
            let boxes = obstacles.iter().map(|o| &o.bounds).chain(
                enemies
                    .iter()
                    .filter(|e| !e.marked_for_deletion)
                    .map(|e| &e.bounds),
            );
            if first_blocker(&feet, dir, lookahead, boxes).is_some() {
                self.moving = false;
                return true;
            }
        }
        false
    }

    /// Enter or leave attack mode; attacking pins the player in place
    pub fn check_attack_mode(&mut self, input: &TickInput) {
        if input.action_held() {
            if !self.attack {
                self.frame_x = 0;
            }
            self.attack = true;
            self.moving = false;
        } else {
            self.attack = false;
        }
        self.max_frame_x = frame_cap(input);
    }
}

fn frame_cap(input: &TickInput) -> u32 {
    if input.action_held() {
        PLAYER_ATTACK_MAX_FRAME
    } else {
        PLAYER_MAX_FRAME
    }
}
