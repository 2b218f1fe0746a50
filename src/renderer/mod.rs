//! Draw list for the host canvas
//!
//! The simulation never touches a 2D context. Each frame it hands the host a
//! back-to-front list of commands; the host maps them onto image blits, rect
//! fills and text.

pub mod sprites;

use glam::Vec2;

use crate::consts::{PLAYER_SPRITE, SLIME_SPRITE};
use crate::sim::{Aabb, GameState, StaticLayer};
use sprites::{PLAYER_IMAGE, SLIME_IMAGE, sheet_cell};

/// Where the score label sits on screen
pub const SCORE_POS: Vec2 = Vec2::new(20.0, 50.0);
pub const SCORE_FONT: &str = "bold 48px Silkscreen";
pub const SCORE_COLOR: &str = "brown";
/// Obstacles are drawn fully transparent; raise alpha to debug the map
pub const OBSTACLE_FILL: [f32; 4] = [1.0, 0.0, 0.0, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole image at its natural size
    Image { image: &'static str, at: Vec2 },
    /// One sheet cell scaled into `dst`
    Sprite {
        image: &'static str,
        src: Aabb,
        dst: Aabb,
    },
    FillRect { rect: Aabb, rgba: [f32; 4] },
    Text {
        text: String,
        at: Vec2,
        font: &'static str,
        color: &'static str,
    },
}

fn layer(layer: &StaticLayer) -> DrawCommand {
    DrawCommand::Image {
        image: layer.image,
        at: layer.pos,
    }
}

pub fn score_label(score: u64) -> String {
    format!("Score: {}", score)
}

/// Build this frame's draw list
///
/// Order: background, obstacles, player, slimes, vanish effects, foreground,
/// score.
pub fn frame(state: &GameState) -> Vec<DrawCommand> {
    let mut cmds = Vec::with_capacity(
        5 + state.obstacles.len() + state.enemies.len() + state.vanishing.len(),
    );

    cmds.push(layer(&state.background));

    cmds.extend(state.obstacles.iter().map(|o| DrawCommand::FillRect {
        rect: o.bounds,
        rgba: OBSTACLE_FILL,
    }));

    let p = &state.player;
    cmds.push(DrawCommand::Sprite {
        image: PLAYER_IMAGE,
        src: sheet_cell(p.frame_x, p.frame_y, PLAYER_SPRITE),
        dst: p.bounds,
    });

    cmds.extend(state.enemies.iter().map(|e| DrawCommand::Sprite {
        image: SLIME_IMAGE,
        src: sheet_cell(e.frame_x, e.frame_y, SLIME_SPRITE),
        dst: e.bounds,
    }));

    cmds.extend(state.vanishing.iter().map(|v| DrawCommand::Sprite {
        image: SLIME_IMAGE,
        src: sheet_cell(v.frame_x, v.frame_y, SLIME_SPRITE),
        dst: v.bounds,
    }));

    cmds.push(layer(&state.foreground));

    cmds.push(DrawCommand::Text {
        text: score_label(state.score()),
        at: SCORE_POS,
        font: SCORE_FONT,
        color: SCORE_COLOR,
    });

    cmds
}
