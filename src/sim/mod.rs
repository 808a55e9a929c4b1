//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Driven only by timestamps and held-direction input
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod lifecycle;
pub mod physics;
pub mod pursuer;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{hit_threshold, is_pickup_hit, is_stomp};
pub use entity::{Facing, Ground, Pickup, Player, PlayerState, Pursuer};
pub use lifecycle::{CrushedStep, ScheduledTask};
pub use spawn::{Placement, SpawnController};
pub use state::{EndCause, GameEvent, GamePhase, GameState};
pub use tick::{FrameClock, TickInput, TickReport, autopilot, tick};
