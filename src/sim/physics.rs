//! Kinematics: gravity, ground clamping and horizontal wraparound
//!
//! Velocities are per tick, so integration is a plain add with no dt.

use glam::Vec2;

use super::entity::{Facing, Ground, Player};

/// Apply one tick of gravity, then move by the new vertical velocity
#[inline]
pub fn integrate_vertical(pos: &mut Vec2, vel_y: &mut f32, gravity: f32) {
    *vel_y += gravity;
    pos.y += *vel_y;
}

/// Snap an entity resting on or below the ground back onto its surface
///
/// Returns true when the entity was clamped (i.e. it is in ground contact).
pub fn clamp_to_ground(pos: &mut Vec2, vel_y: &mut f32, height: f32, ground: &Ground) -> bool {
    let rest = ground.rest_y(height);
    if pos.y >= rest {
        pos.y = rest;
        *vel_y = 0.0;
        true
    } else {
        false
    }
}

/// Toroidal wrap: leaving one side re-enters from the other, keeping overshoot
///
/// The visible span is `[-half_width, world_width + half_width]`; positions
/// inside it (edges included) are returned unchanged.
pub fn wrap_horizontal(x: f32, half_width: f32, world_width: f32) -> f32 {
    let min = -half_width;
    let max = world_width + half_width;
    if x >= min && x <= max {
        return x;
    }
    let span = max - min;
    (x - min).rem_euclid(span) + min
}

/// Move an active player by the held directions and wrap at the edges
///
/// Left is applied before right, so holding both leaves the player in place
/// but facing right.
pub fn step_player(player: &mut Player, left: bool, right: bool, speed: f32, world_width: f32) {
    if left {
        player.pos.x -= speed;
        player.facing = Facing::Left;
    }
    if right {
        player.pos.x += speed;
        player.facing = Facing::Right;
    }
    player.pos.x = wrap_horizontal(player.pos.x, player.size.x / 2.0, world_width);
}
