//! Play-spawn schedule.
//!
//! Pending pieces walk the play curves over `range` spawns: the n-th spawn
//! uses time `n / range`, and the index wraps back to 0 after `range` spawns.

use serde::{Deserialize, Serialize};

use crate::core::PuzzleError;

/// Cycling normalized-time source for play spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    index: u32,
    range: u32,
}

impl SpawnSchedule {
    /// Create a schedule over `range` spawns.
    pub fn new(range: u32) -> Result<Self, PuzzleError> {
        if range == 0 {
            return Err(PuzzleError::ZeroSpawnRange);
        }
        Ok(Self { index: 0, range })
    }

    /// Normalized time of the next spawn, in `[0, 1)`.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.index as f32 / self.range as f32
    }

    /// Return the current time and move to the next spawn.
    pub fn advance(&mut self) -> f32 {
        let time = self.time();
        self.index += 1;
        if self.index >= self.range {
            self.index = 0;
        }
        time
    }

    /// Spawns taken in the current cycle.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn range(&self) -> u32 {
        self.range
    }
}
