//! Sprite sheet lookup
//!
//! Sheets are uniform grids: column = animation frame, row = animation.

use glam::Vec2;

use crate::sim::Aabb;

pub const PLAYER_IMAGE: &str = "assets/img/player.png";
pub const SLIME_IMAGE: &str = "assets/img/slime.png";

/// Source rectangle of cell (`frame_x`, `frame_y`) on a sheet of `cell`-sized squares
#[inline]
pub fn sheet_cell(frame_x: u32, frame_y: u32, cell: f32) -> Aabb {
    Aabb::from_pos_size(
        Vec2::new(frame_x as f32 * cell, frame_y as f32 * cell),
        Vec2::splat(cell),
    )
}
