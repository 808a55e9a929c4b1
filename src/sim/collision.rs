//! Forgiving box overlap tests between entities
//!
//! Horizontal (and for pickups, vertical) hits use a threshold of the summed
//! extents divided by `hitbox_divisor`, not the exact half-extents.

use glam::Vec2;

use super::entity::{Pickup, Player, Pursuer};

/// Threshold below which two extents count as touching
#[inline]
pub fn hit_threshold(a: f32, b: f32, divisor: f32) -> f32 {
    (a + b) / divisor
}

/// Pursuer landing on the player from above
///
/// Requires the pursuer to be falling and the vertical ranges to overlap.
/// Only meaningful while the player is active; callers skip it otherwise.
pub fn is_stomp(pursuer: &Pursuer, player: &Player, divisor: f32) -> bool {
    let dx = (pursuer.pos.x - player.pos.x).abs();
    if dx >= hit_threshold(pursuer.size.x, player.size.x, divisor) {
        return false;
    }
    if pursuer.vel_y <= 0.0 {
        return false;
    }
    let player_top = player.pos.y - player.size.y / 2.0;
    let player_bottom = player.pos.y + player.size.y / 2.0;
    pursuer.top() < player_bottom && pursuer.bottom() > player_top
}

/// Player touching an active pickup
pub fn is_pickup_hit(player: &Player, pickup: &Pickup, divisor: f32) -> bool {
    let d: Vec2 = (player.pos - pickup.pos).abs();
    d.x < hit_threshold(player.size.x, pickup.size.x, divisor)
        && d.y < hit_threshold(player.size.y, pickup.size.y, divisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HITBOX_DIVISOR;
    use crate::tuning::Tuning;

    fn entities() -> (Player, Pursuer, Pickup) {
        let tuning = Tuning::default();
        (Player::new(&tuning), Pursuer::new(&tuning), Pickup::new(&tuning))
    }

    #[test]
    fn test_stomp_hit() {
        let (mut player, mut pursuer, _) = entities();
        player.pos.x = 400.0;
        pursuer.pos.x = 395.0;
        pursuer.pos.y = player.pos.y - 60.0;
        pursuer.vel_y = 5.0;
        assert!(is_stomp(&pursuer, &player, HITBOX_DIVISOR));
    }

    #[test]
    fn test_stomp_requires_falling() {
        let (player, mut pursuer, _) = entities();
        pursuer.pos = player.pos;
        pursuer.vel_y = 0.0;
        assert!(!is_stomp(&pursuer, &player, HITBOX_DIVISOR));
        pursuer.vel_y = -4.0;
        assert!(!is_stomp(&pursuer, &player, HITBOX_DIVISOR));
    }

    #[test]
    fn test_stomp_horizontal_boundary_is_exclusive() {
        let (mut player, mut pursuer, _) = entities();
        player.pos.x = 0.0;
        // (50 + 60) / 3
        let edge = hit_threshold(pursuer.size.x, player.size.x, HITBOX_DIVISOR);
        pursuer.pos.y = player.pos.y - 50.0;
        pursuer.vel_y = 1.0;

        pursuer.pos.x = player.pos.x + edge;
        assert!(!is_stomp(&pursuer, &player, HITBOX_DIVISOR));
        pursuer.pos.x = player.pos.x + edge - 0.01;
        assert!(is_stomp(&pursuer, &player, HITBOX_DIVISOR));
    }

    #[test]
    fn test_stomp_needs_vertical_overlap() {
        let (player, mut pursuer, _) = entities();
        pursuer.pos.x = player.pos.x;
        pursuer.vel_y = 2.0;
        // Pursuer bottom exactly at player top: no overlap
        pursuer.pos.y = player.pos.y - player.size.y / 2.0 - pursuer.size.y / 2.0;
        assert!(!is_stomp(&pursuer, &player, HITBOX_DIVISOR));
        pursuer.pos.y += 1.0;
        assert!(is_stomp(&pursuer, &player, HITBOX_DIVISOR));
    }

    #[test]
    fn test_pickup_thresholds() {
        let (player, _, mut pickup) = entities();
        // (60 + 30) / 3 = 30 on both axes
        pickup.pos = player.pos + Vec2::new(29.9, 0.0);
        assert!(is_pickup_hit(&player, &pickup, HITBOX_DIVISOR));
        pickup.pos = player.pos + Vec2::new(30.0, 0.0);
        assert!(!is_pickup_hit(&player, &pickup, HITBOX_DIVISOR));
        pickup.pos = player.pos + Vec2::new(0.0, -30.0);
        assert!(!is_pickup_hit(&player, &pickup, HITBOX_DIVISOR));
    }
}
