//! Pursuer AI: chase the player's x, jump at random, land via the ground clamp

use rand::Rng;

use super::entity::{Facing, Ground, Pursuer};
use super::physics::{clamp_to_ground, integrate_vertical, wrap_horizontal};
use crate::tuning::Tuning;

/// Horizontal chase step toward `target_x`
///
/// Inside the dead zone neither position nor facing changes.
pub fn chase(pursuer: &mut Pursuer, target_x: f32, speed: f32, dead_zone: f32) {
    let dx = target_x - pursuer.pos.x;
    if dx.abs() > dead_zone {
        pursuer.facing = Facing::toward(dx);
        pursuer.pos.x += speed * dx.signum();
    }
}

/// Start a jump if grounded and the per-tick trial succeeds
///
/// Returns true when a jump started this tick. `chance` is clamped to [0, 1];
/// NaN never jumps.
pub fn try_jump<R: Rng + ?Sized>(pursuer: &mut Pursuer, rng: &mut R, chance: f64, impulse: f32) -> bool {
    if pursuer.airborne {
        return false;
    }
    let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    if rng.random_bool(chance) {
        pursuer.vel_y = impulse;
        pursuer.airborne = true;
        true
    } else {
        false
    }
}

/// Full pursuer update for one tick
pub fn update<R: Rng + ?Sized>(
    pursuer: &mut Pursuer,
    player_x: f32,
    ground: &Ground,
    tuning: &Tuning,
    rng: &mut R,
) {
    chase(pursuer, player_x, tuning.pursuer_speed, tuning.dead_zone);
    try_jump(pursuer, rng, tuning.jump_chance, tuning.jump_impulse);

    integrate_vertical(&mut pursuer.pos, &mut pursuer.vel_y, tuning.gravity);
    if clamp_to_ground(&mut pursuer.pos, &mut pursuer.vel_y, pursuer.size.y, ground) {
        pursuer.airborne = false;
    }

    pursuer.pos.x = wrap_horizontal(pursuer.pos.x, pursuer.size.x / 2.0, tuning.world_width);
}
