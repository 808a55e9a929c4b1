//! Turtle Stomp - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, pursuer AI, collisions, session state)
//! - `renderer`: Drawable frame snapshots and the Canvas2D sink
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted best score

pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Velocities and accelerations are per simulation tick; durations are in
/// milliseconds. World units are canvas pixels.
pub mod consts {
    /// Target update rate
    pub const TARGET_FPS: f64 = 60.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 40.0;
    /// Width of one ground tile as drawn
    pub const GROUND_TILE_WIDTH: f32 = 70.0;

    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.5;

    /// Player (turtle)
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Upward launch when crushed
    pub const CRUSH_LAUNCH: f32 = -15.0;
    /// Spin per tick while crushed (radians)
    pub const CRUSH_SPIN: f32 = 0.1;
    /// Delay between the crush and the end of the session
    pub const SESSION_END_DELAY_MS: f64 = 3000.0;
    /// How far below the world a crushed player must fall to end early
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Pursuer (mario)
    pub const PURSUER_WIDTH: f32 = 50.0;
    pub const PURSUER_HEIGHT: f32 = 90.0;
    pub const PURSUER_SPEED: f32 = 3.0;
    pub const PURSUER_START_X: f32 = 50.0;
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Per-tick jump probability while grounded
    pub const JUMP_CHANCE: f64 = 0.08;
    /// No horizontal chase inside this distance
    pub const DEAD_ZONE: f32 = 10.0;

    /// Pickup (mushroom)
    pub const PICKUP_WIDTH: f32 = 30.0;
    pub const PICKUP_HEIGHT: f32 = 30.0;
    pub const PICKUP_REWARD: u64 = 10;
    pub const SPAWN_INTERVAL_MS: f64 = 3000.0;
    /// Keep spawns this far from the world edges
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Minimum horizontal distance from player and pursuer
    pub const SPAWN_CLEARANCE: f32 = 100.0;
    /// Rejection-sampling cap before falling back to any position
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;

    /// Hit threshold = summed extents / divisor (3 gives a forgiving box)
    pub const HITBOX_DIVISOR: f32 = 3.0;
}

/// Frame budget in milliseconds for a target rate
#[inline]
pub fn frame_budget_ms(fps: f64) -> f64 {
    1000.0 / fps
}
