//! Session state and core simulation types
//!
//! A single owned record holds everything one play-through mutates. It is
//! reinitialized in place on every start/restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ground, Pickup, Player, Pursuer};
use super::lifecycle::{self, ScheduledTask};
use super::spawn::{self, SpawnController};
use super::tick::FrameClock;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start command
    Idle,
    /// Session in progress
    Running,
    /// Session ended, waiting for restart
    GameOver,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// The post-crush delay elapsed
    Timer,
    /// The crushed player fell below the world
    FellOffScreen,
}

/// Notifications for the runner (HUD, persistence, restart button)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    PickupSpawned { x: f32 },
    PickupCollected { score: u64 },
    NewHighScore { score: u64 },
    PlayerCrushed,
    SessionEnded {
        score: u64,
        high_score: u64,
        cause: EndCause,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub ground: Ground,
    pub player: Player,
    pub pursuer: Pursuer,
    pub pickup: Pickup,
    pub score: u64,
    /// Best score seen, including earlier sessions
    pub high_score: u64,
    pub spawn: SpawnController,
    /// Pending deferred session end, armed on crush
    pub session_end: Option<ScheduledTask>,
    pub clock: FrameClock,
    /// Number of sessions started
    pub sessions: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle game; `high_score` comes from persistent storage
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self {
            ground: Ground::new(&tuning),
            player: Player::new(&tuning),
            pursuer: Pursuer::new(&tuning),
            pickup: Pickup::new(&tuning),
            tuning,
            seed,
            phase: GamePhase::Idle,
            score: 0,
            high_score,
            spawn: SpawnController::new(),
            session_end: None,
            clock: FrameClock::default(),
            sessions: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start or restart a session
    ///
    /// Resets every entity, the score and the spawn timer in place, cancels
    /// any pending session end and re-anchors the frame clock.
    pub fn start(&mut self) -> GameEvent {
        self.player.reset(&self.tuning);
        self.pursuer.reset(&self.tuning);
        self.pickup.reset(&self.tuning);
        self.score = 0;
        self.spawn.reset();
        self.session_end = None;
        self.clock.reset();
        self.phase = GamePhase::Running;
        self.sessions += 1;

        log::info!("Session {} started (high score {})", self.sessions, self.high_score);
        GameEvent::SessionStarted
    }

    /// Move the player to Crushed and arm the deferred session end
    ///
    /// No-op if the player is already crushed.
    pub fn crush_player(&mut self, now_ms: f64) -> Option<GameEvent> {
        if !lifecycle::crush(&mut self.player, self.tuning.crush_launch) {
            return None;
        }
        self.session_end = Some(ScheduledTask::after(now_ms, self.tuning.session_end_delay_ms));
        log::debug!("Player crushed at {:.0} ms", now_ms);
        Some(GameEvent::PlayerCrushed)
    }

    /// Fire the deferred session end if its deadline has passed
    pub fn poll_session_timer(&mut self, now_ms: f64) -> Option<GameEvent> {
        match self.session_end {
            Some(task) if task.is_due(now_ms) => {
                self.session_end = None;
                self.end_session(EndCause::Timer)
            }
            _ => None,
        }
    }

    /// Transition to GameOver exactly once per session
    ///
    /// Cancels the deferred trigger so it cannot fire a second time.
    pub fn end_session(&mut self, cause: EndCause) -> Option<GameEvent> {
        self.session_end = None;
        if !self.is_running() {
            return None;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Session {} over ({:?}): score {}, high score {}",
            self.sessions,
            cause,
            self.score,
            self.high_score
        );
        Some(GameEvent::SessionEnded {
            score: self.score,
            high_score: self.high_score,
            cause,
        })
    }

    /// Activate the pickup if allowed; see [`spawn::choose_x`] for placement
    pub fn try_spawn_pickup(&mut self) -> Option<GameEvent> {
        if !self.is_running() || self.pickup.active || self.player.is_crushed() {
            return None;
        }
        let avoid = [self.player.pos.x, self.pursuer.pos.x];
        let placement = spawn::choose_x(&mut self.rng, &self.tuning, &avoid);
        let x = placement.x();
        self.pickup.activate(x, self.ground.y);
        log::debug!("Pickup spawned: {:?}", placement);
        Some(GameEvent::PickupSpawned { x })
    }

    /// Consume the active pickup: deactivate and score in one step
    ///
    /// Returns `PickupCollected`, followed by `NewHighScore` when the record
    /// moved; empty if no pickup was active.
    pub fn collect_pickup(&mut self) -> Vec<GameEvent> {
        if !self.pickup.active {
            return Vec::new();
        }
        self.pickup.active = false;
        self.score += self.tuning.pickup_reward;
        let mut events = vec![GameEvent::PickupCollected { score: self.score }];

        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("New high score: {}", self.high_score);
            events.push(GameEvent::NewHighScore {
                score: self.high_score,
            });
        }
        events
    }

    /// Y below which a crushed player counts as gone
    #[inline]
    pub fn offscreen_y(&self) -> f32 {
        self.tuning.world_height + self.tuning.offscreen_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345, 0);
        state.start();
        state
    }

    #[test]
    fn test_new_is_idle() {
        let state = GameState::new(Tuning::default(), 1, 70);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.high_score, 70);
        assert_eq!(state.sessions, 0);
    }

    #[test]
    fn test_restart_reinitializes_and_cancels_timer() {
        let mut state = running();
        state.score = 30;
        state.player.pos.x = 10.0;
        state.pickup.active = true;
        state.spawn.advance(1500.0, 3000.0);
        state.crush_player(100.0);
        assert!(state.session_end.is_some());

        state.start();
        assert_eq!(state.score, 0);
        assert!(state.player.is_active());
        assert_eq!(state.player.pos.x, state.tuning.world_width / 2.0);
        assert!(!state.pickup.active);
        assert_eq!(state.spawn.elapsed_ms(), 0.0);
        assert!(state.session_end.is_none());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.sessions, 2);
    }

    #[test]
    fn test_end_session_once() {
        let mut state = running();
        state.crush_player(0.0);
        assert!(state.end_session(EndCause::FellOffScreen).is_some());
        assert!(state.session_end.is_none());
        assert!(state.end_session(EndCause::Timer).is_none());
        assert!(state.poll_session_timer(10_000.0).is_none());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_timer_fires_after_delay() {
        let mut state = running();
        assert_eq!(state.crush_player(500.0), Some(GameEvent::PlayerCrushed));
        assert!(state.crush_player(600.0).is_none());
        // Re-crush did not re-arm
        assert!(state.poll_session_timer(3499.0).is_none());
        let ev = state.poll_session_timer(3500.0);
        assert!(matches!(
            ev,
            Some(GameEvent::SessionEnded {
                cause: EndCause::Timer,
                ..
            })
        ));
    }

    #[test]
    fn test_spawn_gating() {
        let mut state = GameState::new(Tuning::default(), 5, 0);
        assert!(state.try_spawn_pickup().is_none(), "idle game must not spawn");

        state.start();
        assert!(matches!(state.try_spawn_pickup(), Some(GameEvent::PickupSpawned { .. })));
        assert!(state.pickup.active);
        assert!(state.try_spawn_pickup().is_none(), "only one pickup at a time");

        state.pickup.active = false;
        state.crush_player(0.0);
        assert!(state.try_spawn_pickup().is_none(), "no spawns after crush");
    }

    #[test]
    fn test_collect_scores_once() {
        let mut state = running();
        state.high_score = 10;
        state.try_spawn_pickup();

        assert_eq!(state.collect_pickup(), vec![GameEvent::PickupCollected { score: 10 }]);
        assert!(state.collect_pickup().is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 10);

        state.try_spawn_pickup();
        assert_eq!(state.high_score, 10);
        assert_eq!(
            state.collect_pickup(),
            vec![
                GameEvent::PickupCollected { score: 20 },
                GameEvent::NewHighScore { score: 20 }
            ]
        );
    }

    #[test]
    fn test_spawn_in_narrow_world_falls_back() {
        let tuning = Tuning {
            world_width: 100.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 1, 0);
        state.start();
        assert_eq!(state.try_spawn_pickup(), Some(GameEvent::PickupSpawned { x: 50.0 }));
        assert!(state.pickup.active);
    }
}
