//! Error types.
//!
//! Only placement rejection and setup failures are errors. Empty cascades,
//! capped evolution and all-zero spawn weights are normal outcomes.

use hexx::Hex;

use super::config::{CoordinateSystem, GridShape};
use super::tier::Tier;

/// Why a placement target was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTargetReason {
    /// The coordinate is not a cell of the grid.
    #[error("not a member of the grid")]
    OutOfGrid,

    /// The cell already holds a piece.
    #[error("already occupied by {0}")]
    Occupied(Tier),
}

/// Errors raised by puzzle setup and placement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// Placement rejected. Not fatal: the host should ignore the input.
    #[error("invalid placement target ({}, {}): {reason}", .target.x, .target.y)]
    InvalidTarget {
        target: Hex,
        reason: InvalidTargetReason,
    },

    /// No neighbor strategy exists for the configured coordinate system.
    #[error("unsupported coordinate system: {0:?}")]
    UnsupportedCoordinateSystem(CoordinateSystem),

    /// The configured grid shape has too many cells to build.
    #[error("grid shape {0:?} has too many cells")]
    GridTooLarge(GridShape),

    /// A spawn table needs at least one tier.
    #[error("spawn table has no tiers configured")]
    EmptySpawnTable,

    /// A tier outside `[0, max]`.
    #[error("{tier} exceeds maximum {max}")]
    TierOutOfRange { tier: Tier, max: Tier },

    /// The play-spawn schedule needs a range of at least 1.
    #[error("spawn rate range must be at least 1")]
    ZeroSpawnRange,
}

impl PuzzleError {
    /// Whether the host can recover by ignoring the offending input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PuzzleError::InvalidTarget { .. })
    }
}
