//! Axis-aligned bounding boxes
//!
//! Every entity in the world is a box anchored at its top-left corner. Y grows
//! downward, matching canvas coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.size)
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x + self.size.x > other.pos.x
            && self.pos.x < other.pos.x + other.size.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Same box moved by `delta`
    #[inline]
    pub fn offset(&self, delta: Vec2) -> Aabb {
        Aabb {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Box shrunk to a sub-rectangle: `inset` moves the corner, `shrink` cuts the size
    #[inline]
    pub fn inset(&self, inset: Vec2, shrink: Vec2) -> Aabb {
        Aabb {
            pos: self.pos + inset,
            size: self.size - shrink,
        }
    }
}
