//! Score tracking across runs of a session
//!
//! Three related scores are kept:
//!
//! - a smoothed running score (exponential moving average of duck strength
//!   scaled to 0..100) used for live display,
//! - a session score that accrues a fraction of duck strength every tick,
//! - a best score over all completed runs, finalized when a run stops.
//!
//! Stopping a run folds the session score into the best score. Resuming a run
//! deliberately does not reset any score; only starting a fresh run does.

use serde::{Deserialize, Serialize};

/// Accumulated scores for the current session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    running_score: f32,
    session_score: f32,
    best_score: f32,
}

impl ScoreTracker {
    /// Creates a tracker with all scores at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed running score in 0..100
    pub fn running_score(&self) -> f32 {
        self.running_score
    }

    /// Total session score accrued since the last run start
    pub fn session_score(&self) -> f32 {
        self.session_score
    }

    /// Highest session score over all completed runs
    pub fn best_score(&self) -> f32 {
        self.best_score
    }

    /// Resets the running and session scores for a fresh run
    ///
    /// The best score survives across runs.
    pub fn start_run(&mut self) {
        self.running_score = 0.0;
        self.session_score = 0.0;
    }

    /// Finalizes the current run, keeping the best session score seen so far
    pub fn stop_run(&mut self) {
        if self.session_score > self.best_score {
            self.best_score = self.session_score;
        }
    }

    /// Folds one tick's duck strength into the running and session scores
    ///
    /// `retain` is the fraction of the previous running score kept each tick;
    /// `accrual` is the per-tick session score gained at full duck strength.
    pub fn update(&mut self, duck_strength: f32, retain: f32, accrual: f32) {
        self.running_score = retain * self.running_score + (1.0 - retain) * (duck_strength * 100.0);
        self.session_score += duck_strength * accrual;
    }
}
