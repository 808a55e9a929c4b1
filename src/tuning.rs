//! Data-driven game balance
//!
//! Every gameplay constant in [`crate::consts`] can be overridden from a
//! (possibly partial) JSON document. Overrides are validated before use.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// JSON could not be parsed
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub target_fps: f64,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub crush_launch: f32,
    pub crush_spin: f32,
    pub session_end_delay_ms: f64,
    pub offscreen_margin: f32,

    // === Pursuer ===
    pub pursuer_width: f32,
    pub pursuer_height: f32,
    pub pursuer_speed: f32,
    pub pursuer_start_x: f32,
    pub jump_impulse: f32,
    pub jump_chance: f64,
    pub dead_zone: f32,

    // === Pickups ===
    pub pickup_width: f32,
    pub pickup_height: f32,
    pub pickup_reward: u64,
    pub spawn_interval_ms: f64,
    pub spawn_margin: f32,
    pub spawn_clearance: f32,
    pub spawn_max_attempts: u32,

    // === Collision ===
    pub hitbox_divisor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            target_fps: TARGET_FPS,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            crush_launch: CRUSH_LAUNCH,
            crush_spin: CRUSH_SPIN,
            session_end_delay_ms: SESSION_END_DELAY_MS,
            offscreen_margin: OFFSCREEN_MARGIN,

            pursuer_width: PURSUER_WIDTH,
            pursuer_height: PURSUER_HEIGHT,
            pursuer_speed: PURSUER_SPEED,
            pursuer_start_x: PURSUER_START_X,
            jump_impulse: JUMP_IMPULSE,
            jump_chance: JUMP_CHANCE,
            dead_zone: DEAD_ZONE,

            pickup_width: PICKUP_WIDTH,
            pickup_height: PICKUP_HEIGHT,
            pickup_reward: PICKUP_REWARD,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_margin: SPAWN_MARGIN,
            spawn_clearance: SPAWN_CLEARANCE,
            spawn_max_attempts: SPAWN_MAX_ATTEMPTS,

            hitbox_divisor: HITBOX_DIVISOR,
        }
    }
}

impl Tuning {
    /// LocalStorage key for a tuning override (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "turtle_stomp_tuning";

    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.world_width > 0.0) {
            return invalid("world_width", "must be positive");
        }
        if !(self.world_height > 0.0) {
            return invalid("world_height", "must be positive");
        }
        if !(self.ground_height >= 0.0 && self.ground_height < self.world_height) {
            return invalid("ground_height", "must fit inside the world");
        }
        if !(self.target_fps > 0.0) {
            return invalid("target_fps", "must be positive");
        }
        for (field, size) in [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pursuer_width", self.pursuer_width),
            ("pursuer_height", self.pursuer_height),
            ("pickup_width", self.pickup_width),
            ("pickup_height", self.pickup_height),
        ] {
            if !(size > 0.0) {
                return invalid(field, "must be positive");
            }
        }
        if !(self.player_speed > 0.0) {
            return invalid("player_speed", "must be positive");
        }
        if !(self.pursuer_speed > 0.0) {
            return invalid("pursuer_speed", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.jump_chance) {
            return invalid("jump_chance", "must be within [0, 1]");
        }
        if !(self.hitbox_divisor > 0.0) {
            return invalid("hitbox_divisor", "must be positive");
        }
        if !(self.spawn_margin >= 0.0 && self.world_width - 2.0 * self.spawn_margin > 0.0) {
            return invalid("spawn_margin", "leaves no room to place pickups");
        }
        if self.spawn_max_attempts == 0 {
            return invalid("spawn_max_attempts", "must allow at least one attempt");
        }
        if !(self.spawn_interval_ms > 0.0) {
            return invalid("spawn_interval_ms", "must be positive");
        }
        Ok(())
    }

    /// Y of the ground's top surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    /// Minimum time between processed frames
    #[inline]
    pub fn frame_budget_ms(&self) -> f64 {
        crate::frame_budget_ms(self.target_fps)
    }

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
