//! Entity data: player, pursuer, pickup and ground
//!
//! Positions are centre-anchored. Sizes never change after creation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Horizontal orientation, used only for mirrored drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing toward a signed horizontal offset (zero keeps Right)
    pub fn toward(dx: f32) -> Self {
        if dx < 0.0 { Facing::Left } else { Facing::Right }
    }
}

/// Player lifecycle within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Input-driven, unaffected by gravity
    Active,
    /// Stomped: launched upward, spinning, falling
    Crushed,
}

/// The player-controlled turtle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub facing: Facing,
    pub state: PlayerState,
    /// Spin angle in radians, meaningful only while crushed
    pub rotation: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(tuning.world_width / 2.0, tuning.ground_y() - size.y / 2.0),
            size,
            vel_y: 0.0,
            facing: Facing::Right,
            state: PlayerState::Active,
            rotation: 0.0,
        }
    }

    /// Put the player back at its spawn point without reallocating
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == PlayerState::Active
    }

    #[inline]
    pub fn is_crushed(&self) -> bool {
        self.state == PlayerState::Crushed
    }
}

/// The AI-controlled chaser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub facing: Facing,
    /// Set on jump, cleared only on ground contact
    pub airborne: bool,
}

impl Pursuer {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.pursuer_width, tuning.pursuer_height);
        Self {
            pos: Vec2::new(tuning.pursuer_start_x, tuning.ground_y() - size.y / 2.0),
            size,
            vel_y: 0.0,
            facing: Facing::Right,
            airborne: false,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Top edge of the bounding box
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    /// Bottom edge of the bounding box
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// The collectible mushroom; a single instance is reused across spawns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Pickup {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.pickup_width, tuning.pickup_height),
            active: false,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Place on the ground at `x` and make collectible
    pub fn activate(&mut self, x: f32, ground_y: f32) {
        self.pos = Vec2::new(x, ground_y - self.size.y / 2.0);
        self.active = true;
    }
}

/// Static floor plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ground {
    /// Y of the top surface
    pub y: f32,
    pub height: f32,
}

impl Ground {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            y: tuning.ground_y(),
            height: tuning.ground_height,
        }
    }

    /// Resting centre-y for an entity of the given height
    #[inline]
    pub fn rest_y(&self, height: f32) -> f32 {
        self.y - height / 2.0
    }
}
