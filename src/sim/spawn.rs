//! Pickup spawn timer and placement

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Accumulating spawn timer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnController {
    elapsed_ms: f64,
}

impl SpawnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Add elapsed time; when the interval is reached, reset and return true
    pub fn advance(&mut self, dt_ms: f64, interval_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }
}

/// Where a pickup ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Satisfies the clearance from every avoided x
    Clear(f32),
    /// Retry cap hit; placed without clearance
    Fallback(f32),
}

impl Placement {
    pub fn x(self) -> f32 {
        match self {
            Placement::Clear(x) | Placement::Fallback(x) => x,
        }
    }
}

/// Rejection-sample an x at least `spawn_clearance` from every `avoid` x
///
/// When the margins leave no range to sample, falls back to the world centre.
pub fn choose_x<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, avoid: &[f32]) -> Placement {
    let lo = tuning.spawn_margin;
    let hi = tuning.world_width - tuning.spawn_margin;

    if lo.partial_cmp(&hi) != Some(Ordering::Less) {
        let x = tuning.world_width / 2.0;
        log::warn!(
            "World width {:.1} leaves no spawn range with margin {:.1}, placing at {:.1}",
            tuning.world_width,
            tuning.spawn_margin,
            x
        );
        return Placement::Fallback(x);
    }

    for _ in 0..tuning.spawn_max_attempts {
        let x = rng.random_range(lo..hi);
        if avoid.iter().all(|&a| (x - a).abs() >= tuning.spawn_clearance) {
            return Placement::Clear(x);
        }
    }

    let x = rng.random_range(lo..hi);
    log::warn!(
        "No clear pickup position after {} attempts, placing at {:.1}",
        tuning.spawn_max_attempts,
        x
    );
    Placement::Fallback(x)
}
