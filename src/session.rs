//! Run lifecycle and the process-lifetime high score
//!
//! Restart is destructive replacement: a session never resets a run in
//! place, it builds a fresh `GameState` and feeds it the current best
//! score. The high score lives only as long as the process; nothing is
//! written to disk.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};
use crate::tuning::{Tuning, TuningError};

/// Owns the high score across runs and constructs each new run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    high_score: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score seen by any run committed to this session
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Start a fresh run carrying the current high score.
    pub fn new_run(&self, seed: u64) -> GameState {
        GameState::new(seed, self.high_score)
    }

    /// Start a fresh run with custom balance values.
    pub fn new_run_with_tuning(&self, seed: u64, tuning: Tuning) -> Result<GameState, TuningError> {
        GameState::with_tuning(seed, self.high_score, tuning)
    }

    /// Fold a finished run's result back into the session. Returns true
    /// when the run set a new record. Runs still in progress are ignored.
    pub fn commit(&mut self, run: &GameState) -> bool {
        if run.phase != GamePhase::GameOver {
            return false;
        }
        if run.high_score > self.high_score {
            self.high_score = run.high_score;
            true
        } else {
            false
        }
    }
}
