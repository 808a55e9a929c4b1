//! Drawable snapshot of a session
//!
//! Everything is centre-anchored in world pixels, matching the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::consts::GROUND_TILE_WIDTH;
use crate::sim::{Facing, GamePhase, GameState};

/// Where and how to draw one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityPose {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Radians, applied about the centre
    pub rotation: f32,
}

/// Full drawable state for one tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub world: Vec2,
    /// Top-left x of each ground tile
    pub ground_tiles: Vec<f32>,
    pub ground_y: f32,
    pub ground_height: f32,
    pub pickup: Option<EntityPose>,
    pub player: EntityPose,
    pub player_crushed: bool,
    pub pursuer: EntityPose,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;

        let tile_count = (tuning.world_width / GROUND_TILE_WIDTH).ceil() as usize;
        let ground_tiles = (0..tile_count).map(|i| i as f32 * GROUND_TILE_WIDTH).collect();

        let pickup = state.pickup.active.then(|| EntityPose {
            pos: state.pickup.pos,
            size: state.pickup.size,
            facing: Facing::Right,
            rotation: 0.0,
        });

        let player = &state.player;
        let pursuer = &state.pursuer;

        Self {
            world: Vec2::new(tuning.world_width, tuning.world_height),
            ground_tiles,
            ground_y: state.ground.y,
            ground_height: state.ground.height,
            pickup,
            player: EntityPose {
                pos: player.pos,
                size: player.size,
                facing: player.facing,
                rotation: if player.is_crushed() { player.rotation } else { 0.0 },
            },
            player_crushed: player.is_crushed(),
            pursuer: EntityPose {
                pos: pursuer.pos,
                size: pursuer.size,
                facing: pursuer.facing,
                rotation: 0.0,
            },
            score: state.score,
            high_score: state.high_score,
            phase: state.phase,
        }
    }
}

/// Consumer of frames (canvas, logger, test recorder)
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Logs a one-line summary of each frame at trace level
#[derive(Debug, Default)]
pub struct LogSink {
    pub frames: u64,
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        log::trace!(
            "frame {}: player=({:.1},{:.1}) pursuer=({:.1},{:.1}) pickup={:?} score={}",
            self.frames,
            frame.player.pos.x,
            frame.player.pos.y,
            frame.pursuer.pos.x,
            frame.pursuer.pos.y,
            frame.pickup.map(|p| p.pos.x),
            frame.score
        );
    }
}
