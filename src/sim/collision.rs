//! Collision tests between the player and the world
//!
//! Two kinds of contact matter here:
//! - movement gating: the player's feet box against walls and slimes, with the
//!   obstacle nudged a few units toward the player to look one step ahead
//! - combat: Euclidean distance from the player's feet to a slime's center,
//!   plus a signed gap along the facing direction for the attack reach

use glam::Vec2;

use super::aabb::Aabb;
use super::input::Direction;
use crate::consts::*;

/// Lower-center part of the player sprite that actually touches the ground
#[inline]
pub fn feet_hitbox(player: &Aabb) -> Aabb {
    player.inset(
        Vec2::new(FEET_INSET_X, FEET_INSET_Y),
        Vec2::new(FEET_SHRINK_W, FEET_SHRINK_H),
    )
}

/// Point used for proximity checks: horizontal center, two thirds down
#[inline]
pub fn feet_anchor(player: &Aabb) -> Vec2 {
    Vec2::new(
        player.pos.x + player.size.x / 2.0,
        player.pos.y + player.size.y / 1.5,
    )
}

/// How an obstacle is shifted to test one step of travel in `dir`
///
/// The world scrolls opposite to the player's heading, so the obstacle moves
/// toward the player.
#[inline]
pub fn lookahead_offset(dir: Direction, distance: f32) -> Vec2 {
    -dir.unit() * distance
}

/// First box that would block the feet after one step in `dir`
pub fn first_blocker<'a, I>(feet: &Aabb, dir: Direction, lookahead: f32, boxes: I) -> Option<Aabb>
where
    I: IntoIterator<Item = &'a Aabb>,
{
    let nudge = lookahead_offset(dir, lookahead);
    boxes
        .into_iter()
        .map(|b| b.offset(nudge))
        .find(|shifted| feet.overlaps(shifted))
}

/// Feet anchor strictly closer than `radius` to the target center
#[inline]
pub fn in_proximity(anchor: Vec2, target_center: Vec2, radius: f32) -> bool {
    anchor.distance(target_center) < radius
}

/// Signed gap from the player toward the target along `facing` is under `reach`
///
/// The gap is positive when the target lies in the facing direction. A target
/// behind the player yields a negative gap and so also passes; the proximity
/// check upstream bounds how far behind that can be.
#[inline]
pub fn within_reach(player_center: Vec2, target_center: Vec2, facing: Direction, reach: f32) -> bool {
    let gap = match facing {
        Direction::Up => player_center.y - target_center.y,
        Direction::Down => target_center.y - player_center.y,
        Direction::Left => player_center.x - target_center.x,
        Direction::Right => target_center.x - player_center.x,
    };
    gap < reach
}
