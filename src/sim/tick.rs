//! Frame-budgeted simulation tick
//!
//! Core game loop: called once per display refresh with a monotonic
//! timestamp, it advances the session at most once per frame budget.

use serde::{Deserialize, Serialize};

use super::collision::{is_pickup_hit, is_stomp};
use super::lifecycle::{self, CrushedStep};
use super::state::{EndCause, GameEvent, GameState};
use super::{physics, pursuer};

/// Held directions, sampled once per tick (last known value)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Enforces an upper bound on update frequency without blocking
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_frame_ms: Option<f64>,
}

impl FrameClock {
    /// Forget the anchor; the next call re-anchors
    pub fn reset(&mut self) {
        self.last_frame_ms = None;
    }

    /// Elapsed time since the last processed frame, if the budget is met
    ///
    /// The first call after a reset anchors at `now_ms` and reports nothing.
    pub fn gate(&mut self, now_ms: f64, budget_ms: f64) -> Option<f64> {
        let last = *self.last_frame_ms.get_or_insert(now_ms);
        let elapsed = now_ms - last;
        if elapsed < budget_ms {
            return None;
        }
        self.last_frame_ms = Some(now_ms);
        Some(elapsed)
    }
}

/// What happened during one loop invocation
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// True when the simulation advanced and a frame should be presented
    pub stepped: bool,
    pub events: Vec<GameEvent>,
}

/// Run one loop invocation at timestamp `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickReport {
    let mut report = TickReport::default();

    // The deferred session end runs on its own clock, independent of the budget
    if let Some(event) = state.poll_session_timer(now_ms) {
        report.events.push(event);
    }

    if !state.is_running() {
        return report;
    }

    let budget = state.tuning.frame_budget_ms();
    let Some(elapsed) = state.clock.gate(now_ms, budget) else {
        return report;
    };

    report.stepped = true;
    step(state, input, now_ms, elapsed, &mut report.events);
    report
}

/// One simulation step in fixed order:
/// spawn timer, player, pursuer, stomp check, pickup check
fn step(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    elapsed_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    if state.spawn.advance(elapsed_ms, state.tuning.spawn_interval_ms) {
        if let Some(event) = state.try_spawn_pickup() {
            events.push(event);
        }
    }

    if state.player.is_active() {
        physics::step_player(
            &mut state.player,
            input.left,
            input.right,
            state.tuning.player_speed,
            state.tuning.world_width,
        );
    } else {
        let offscreen_y = state.offscreen_y();
        let fell = lifecycle::update_crushed(
            &mut state.player,
            state.tuning.gravity,
            state.tuning.crush_spin,
            offscreen_y,
        );
        if fell == CrushedStep::OffScreen {
            if let Some(event) = state.end_session(EndCause::FellOffScreen) {
                events.push(event);
            }
            return;
        }
    }

    pursuer::update(
        &mut state.pursuer,
        state.player.pos.x,
        &state.ground,
        &state.tuning,
        &mut state.rng,
    );

    let divisor = state.tuning.hitbox_divisor;
    if state.player.is_active() && is_stomp(&state.pursuer, &state.player, divisor) {
        if let Some(event) = state.crush_player(now_ms) {
            events.push(event);
        }
    }

    if state.pickup.active && is_pickup_hit(&state.player, &state.pickup, divisor) {
        events.extend(state.collect_pickup());
    }
}

/// Simple evasive controller used by the headless demo
///
/// Heads for the pickup when the pursuer is not in the way, otherwise
/// keeps away from the pursuer.
pub fn autopilot(state: &GameState) -> TickInput {
    let player_x = state.player.pos.x;
    let threat_dx = state.pursuer.pos.x - player_x;
    let danger = threat_dx.abs() < 150.0;

    let pickup_dx = state.pickup.pos.x - player_x;
    let blocked = danger && pickup_dx.signum() == threat_dx.signum();

    let goal_dx = if state.pickup.active && !blocked {
        pickup_dx
    } else if danger {
        -threat_dx
    } else {
        0.0
    };

    TickInput {
        left: goal_dx < -state.tuning.player_speed,
        right: goal_dx > state.tuning.player_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// Timestamps comfortably above the 60 fps budget
    const FRAME: f64 = 17.0;

    fn calm_tuning() -> Tuning {
        Tuning {
            jump_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn running(tuning: Tuning) -> GameState {
        let mut state = GameState::new(tuning, 4242, 0);
        state.start();
        state
    }

    #[test]
    fn test_first_call_anchors_and_skips() {
        let mut state = running(calm_tuning());
        let before = state.pursuer.pos;
        let report = tick(&mut state, &TickInput::default(), 1000.0);
        assert!(!report.stepped);
        assert_eq!(state.pursuer.pos, before);
    }

    #[test]
    fn test_budget_skip_does_not_mutate() {
        let mut state = running(calm_tuning());
        tick(&mut state, &TickInput::default(), 0.0);

        let report = tick(&mut state, &TickInput { left: true, right: false }, 10.0);
        assert!(!report.stepped);
        assert_eq!(state.player.pos.x, 400.0);

        // Elapsed is measured from the last processed frame, not the skipped one
        let report = tick(&mut state, &TickInput { left: true, right: false }, FRAME);
        assert!(report.stepped);
        assert_eq!(state.player.pos.x, 395.0);
        assert_eq!(state.spawn.elapsed_ms(), FRAME);
    }

    #[test]
    fn test_stomp_scenario_ends_once_off_screen() {
        let mut state = running(calm_tuning());
        let input = TickInput::default();
        tick(&mut state, &input, 0.0);

        state.player.pos.x = 400.0;
        state.pursuer.pos.x = 395.0;
        state.pursuer.pos.y = state.player.pos.y - 60.0;
        state.pursuer.vel_y = 5.0;
        state.pursuer.airborne = true;

        let report = tick(&mut state, &input, FRAME);
        assert!(report.events.contains(&GameEvent::PlayerCrushed));
        assert!(state.player.is_crushed());
        assert_eq!(state.player.vel_y, -15.0);
        let armed = state.session_end.expect("session end armed");
        assert_eq!(armed.due_ms, FRAME + 3000.0);

        let mut now = FRAME;
        let mut ended_at = None;
        while now < 5000.0 {
            now += FRAME;
            let report = tick(&mut state, &input, now);
            for event in report.events {
                if let GameEvent::SessionEnded { cause, .. } = event {
                    assert!(ended_at.is_none(), "session ended twice");
                    assert_eq!(cause, EndCause::FellOffScreen);
                    ended_at = Some(now);
                }
            }
        }

        let ended_at = ended_at.expect("session ended");
        assert!(ended_at < 3000.0, "fell off before the timer: {}", ended_at);
        assert!(state.session_end.is_none());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_timer_ends_session_when_player_stays_on_screen() {
        let mut state = running(Tuning {
            // Pin the crushed player so only the timer can end the session
            gravity: 0.0,
            crush_launch: 0.0,
            ..calm_tuning()
        });
        let input = TickInput::default();
        tick(&mut state, &input, 0.0);
        state.crush_player(0.0);

        let mut ends = 0;
        let mut now = 0.0;
        while now < 4000.0 {
            now += FRAME;
            ends += tick(&mut state, &input, now)
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::SessionEnded { cause: EndCause::Timer, .. }))
                .count();
        }
        assert_eq!(ends, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_stops_ticks() {
        let mut state = running(calm_tuning());
        state.end_session(EndCause::Timer);
        let before = state.pursuer.pos;
        tick(&mut state, &TickInput::default(), 0.0);
        let report = tick(&mut state, &TickInput { left: true, right: false }, 100.0);
        assert!(!report.stepped);
        assert_eq!(state.pursuer.pos, before);
    }

    #[test]
    fn test_spawn_after_interval_then_collect() {
        let mut state = running(calm_tuning());
        let input = TickInput::default();
        tick(&mut state, &input, 0.0);

        let mut now = 0.0;
        let mut spawned = None;
        while spawned.is_none() {
            now += 100.0;
            for event in tick(&mut state, &input, now).events {
                if let GameEvent::PickupSpawned { x } = event {
                    spawned = Some(x);
                }
            }
            assert!(now <= 3000.0);
        }
        assert_eq!(now, 3000.0);
        assert!(state.pickup.active);

        // Walk the player onto the pickup
        state.player.pos.x = state.pickup.pos.x;
        state.pursuer.pos.x = state.pickup.pos.x + 300.0;
        let report = tick(&mut state, &input, now + 100.0);
        assert!(report.events.contains(&GameEvent::PickupCollected { score: 10 }));
        assert!(report.events.contains(&GameEvent::NewHighScore { score: 10 }));
        assert!(!state.pickup.active);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_autopilot_flees_close_pursuer() {
        let mut state = running(calm_tuning());
        state.pursuer.pos.x = state.player.pos.x - 50.0;
        let input = autopilot(&state);
        assert!(input.right && !input.left);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_pickup_scores_exactly_once(
            seed in any::<u64>(),
            moves in prop::collection::vec((any::<bool>(), any::<bool>(), 1.0f64..120.0), 1..400),
        ) {
            let mut state = GameState::new(Tuning::default(), seed, 0);
            state.start();
            let mut now = 0.0;
            let mut collected = 0u64;
            for (left, right, gap) in moves {
                now += gap;
                let report = tick(&mut state, &TickInput { left, right }, now);
                let hits = report
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::PickupCollected { .. }))
                    .count();
                prop_assert!(hits <= 1);
                if hits == 1 {
                    prop_assert!(!state.pickup.active);
                }
                collected += hits as u64;
            }
            prop_assert_eq!(state.score, collected * state.tuning.pickup_reward);
            prop_assert!(state.high_score >= state.score);
        }

        #[test]
        fn prop_high_score_is_running_max(seed in any::<u64>(), sessions in 1usize..4) {
            let mut state = GameState::new(Tuning::default(), seed, 0);
            let mut best = 0u64;
            let mut last_high = 0u64;
            let mut now = 0.0;
            for _ in 0..sessions {
                state.start();
                let mut frames = 0;
                while state.is_running() && frames < 3000 {
                    now += FRAME;
                    let input = autopilot(&state);
                    tick(&mut state, &input, now);
                    prop_assert!(state.high_score >= last_high);
                    last_high = state.high_score;
                    frames += 1;
                }
                best = best.max(state.score);
                prop_assert_eq!(state.high_score, best);
            }
        }
    }
}
