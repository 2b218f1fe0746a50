//! Vanish effect left behind by a defeated slime
//!
//! Pure animation: no collision, no input. When the last frame has played the
//! effect reports completion once, which is what scores the kill.

use glam::Vec2;

use super::aabb::Aabb;
use super::enemy::{Enemy, Heading};
use super::state::Movable;
use crate::consts::VANISH_MAX_FRAME;

pub const ROW_VANISH: u32 = 4;
pub const ROW_VANISH_LEFT: u32 = 9;

#[derive(Debug, Clone)]
pub struct VanishEffect {
    pub id: u32,
    pub bounds: Aabb,
    /// The slime was last hopping left
    pub facing_left: bool,
    pub frame_x: u32,
    pub frame_y: u32,
    pub max_frame_x: u32,
    pub marked_for_deletion: bool,
}

impl VanishEffect {
    pub fn from_enemy(id: u32, enemy: &Enemy) -> Self {
        Self {
            id,
            bounds: enemy.bounds,
            facing_left: enemy.heading == Some(Heading::Left),
            frame_x: 0,
            frame_y: ROW_VANISH,
            max_frame_x: VANISH_MAX_FRAME,
            marked_for_deletion: false,
        }
    }

    /// Throttled step. Returns true exactly once, when the animation finishes.
    pub fn update(&mut self) -> bool {
        if self.marked_for_deletion {
            return false;
        }
        if self.facing_left {
            self.frame_y = ROW_VANISH_LEFT;
        }
        if self.frame_x < self.max_frame_x {
            self.frame_x += 1;
            false
        } else {
            self.marked_for_deletion = true;
            true
        }
    }
}

impl Movable for VanishEffect {
    fn translate(&mut self, delta: Vec2) {
        self.bounds.pos += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_after_max_frame_plus_one_updates() {
        let enemy = Enemy::new(1, Vec2::new(10.0, 20.0), 15.0);
        let mut fx = VanishEffect::from_enemy(2, &enemy);
        assert_eq!(fx.bounds, enemy.bounds);

        let updates = VANISH_MAX_FRAME + 1;
        let mut completions = 0;
        for i in 1..=updates {
            if fx.update() {
                completions += 1;
            }
            assert_eq!(fx.marked_for_deletion, i == updates);
        }
        assert_eq!(completions, 1);

        // Further updates never complete again
        assert!(!fx.update());
        assert!(!fx.update());
    }

    #[test]
    fn test_left_heading_uses_left_row() {
        let mut enemy = Enemy::new(1, Vec2::ZERO, 15.0);
        enemy.heading = Some(Heading::Left);
        let mut fx = VanishEffect::from_enemy(2, &enemy);
        assert_eq!(fx.frame_y, ROW_VANISH);
        fx.update();
        assert_eq!(fx.frame_y, ROW_VANISH_LEFT);
        fx.update();
        assert_eq!(fx.frame_y, ROW_VANISH_LEFT);
    }

    #[test]
    fn test_right_heading_keeps_default_row() {
        let mut enemy = Enemy::new(1, Vec2::ZERO, 15.0);
        enemy.heading = Some(Heading::Right);
        let mut fx = VanishEffect::from_enemy(2, &enemy);
        fx.update();
        assert_eq!(fx.frame_y, ROW_VANISH);
    }
}
