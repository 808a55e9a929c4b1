//! Player lifecycle (Active -> Crushed -> removed) and the deferred session end

use serde::{Deserialize, Serialize};

use super::entity::{Player, PlayerState};
use super::physics::integrate_vertical;

/// A fire-once deadline on the loop's timestamp clock
///
/// Lives inside the session state; arming and cancelling are plain
/// assignments to an `Option<ScheduledTask>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub due_ms: f64,
}

impl ScheduledTask {
    pub fn after(now_ms: f64, delay_ms: f64) -> Self {
        Self {
            due_ms: now_ms + delay_ms,
        }
    }

    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.due_ms
    }
}

/// Outcome of one crushed-player tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrushedStep {
    Falling,
    /// Fell past the bottom margin; the session should end now
    OffScreen,
}

/// Enter the crushed state with an upward launch
///
/// Returns false (and changes nothing) if the player was already crushed.
pub fn crush(player: &mut Player, launch: f32) -> bool {
    if player.state == PlayerState::Crushed {
        return false;
    }
    player.state = PlayerState::Crushed;
    player.vel_y = launch;
    player.rotation = 0.0;
    true
}

/// Ballistic fall with spin; crushed players ignore the ground
pub fn update_crushed(player: &mut Player, gravity: f32, spin: f32, offscreen_y: f32) -> CrushedStep {
    integrate_vertical(&mut player.pos, &mut player.vel_y, gravity);
    player.rotation += spin;

    if player.pos.y > offscreen_y {
        CrushedStep::OffScreen
    } else {
        CrushedStep::Falling
    }
}
