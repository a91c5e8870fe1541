//! Scoring - one point per cleared row, lock events and the running best
//!
//! There is no bonus for clearing several rows at once: four rows are worth
//! exactly four points.
//!
//! Persisting a high score across processes is the caller's business. The
//! session reports every lock through [`LockEvent`]; [`HighScore`] keeps the
//! running maximum for whoever stores it.

use serde::Serialize;

/// Points for clearing `rows` rows in a single lock.
pub fn line_clear_points(rows: u32) -> u32 {
    rows
}

/// Emitted after every lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    /// Game the piece belonged to
    pub episode_id: u32,
    /// Id of the piece that locked
    pub piece_id: u32,
    /// Rows removed by this lock
    pub rows_cleared: u32,
    /// Session score after the clear
    pub score: u32,
    /// The lock ended the game
    pub game_over: bool,
}

/// Running maximum of observed scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously stored best.
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a score; returns true when it is a new best.
    pub fn observe(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Overwrite the stored best (e.g. to forget it).
    pub fn reset_to(&mut self, value: u32) {
        self.best = value;
    }
}
