//! Per-move placement protocol.
//!
//! A move runs `Validating -> Matching -> Evolving* -> Idle`:
//!
//! 1. Reject targets outside the grid or already occupied, and pending
//!    tiers above the maximum
//! 2. Commit the pending piece at the target
//! 3. Probe; on a match remove the region and evolve the piece
//! 4. Re-probe the evolved piece until a level fails to match or
//!    evolution passes the maximum tier
//!
//! A move either completes fully or is rejected before touching the board.

use hexx::Hex;
use tracing::{debug, debug_span};

use crate::board::Board;
use crate::core::{InvalidTargetReason, PuzzleError, Tier};
use crate::grid::HexGrid;
use crate::matching::{Cascade, CascadeStep, MatchEngine};

/// Result of one accepted placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Cell the piece was placed on.
    pub target: Hex,
    /// Tier of the piece that was placed.
    pub placed_tier: Tier,
    /// Tier left at the target, or `None` if evolution passed the maximum
    /// tier and the piece was removed.
    pub final_tier: Option<Tier>,
    /// Cascade levels in order, one removal batch each.
    pub steps: Vec<CascadeStep>,
    /// Points over all levels. Zero if nothing matched.
    pub points: u64,
}

impl PlacementOutcome {
    /// Whether the placement triggered at least one match.
    #[must_use]
    pub fn matched(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Removed cells per cascade level, for sequencing removal animations.
    pub fn removal_batches(&self) -> impl Iterator<Item = &[Hex]> + '_ {
        self.steps.iter().map(|step| step.removed.as_slice())
    }

    /// Total cells removed, not counting the target.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.steps.iter().map(|step| step.removed.len()).sum()
    }

    /// Whether the target ended up empty because evolution was capped.
    #[must_use]
    pub fn capped(&self) -> bool {
        self.final_tier.is_none()
    }
}

impl From<Cascade> for PlacementOutcome {
    fn from(cascade: Cascade) -> Self {
        let points = cascade.points();
        Self {
            target: cascade.origin,
            placed_tier: cascade.start_tier,
            final_tier: cascade.final_tier,
            steps: cascade.steps,
            points,
        }
    }
}

/// Validates and executes placements against a board.
#[derive(Clone, Copy, Debug)]
pub struct PlacementOrchestrator {
    engine: MatchEngine,
}

impl PlacementOrchestrator {
    #[must_use]
    pub fn new(engine: MatchEngine) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Check a placement without performing it.
    pub fn validate<G: HexGrid>(&self, board: &Board, grid: &G, target: Hex, tier: Tier) -> Result<(), PuzzleError> {
        if tier > self.engine.max_tier() {
            return Err(PuzzleError::TierOutOfRange {
                tier,
                max: self.engine.max_tier(),
            });
        }
        if !grid.contains(target) {
            return Err(PuzzleError::InvalidTarget {
                target,
                reason: InvalidTargetReason::OutOfGrid,
            });
        }
        if let Some(existing) = board.get(target) {
            return Err(PuzzleError::InvalidTarget {
                target,
                reason: InvalidTargetReason::Occupied(existing),
            });
        }
        Ok(())
    }

    /// Place `pending` at `target` and run the resulting cascade.
    ///
    /// On error the board is unchanged.
    pub fn place<G: HexGrid>(
        &self,
        board: &mut Board,
        grid: &G,
        target: Hex,
        pending: Tier,
    ) -> Result<PlacementOutcome, PuzzleError> {
        let _span = debug_span!("place", x = target.x, y = target.y, tier = pending.raw()).entered();

        if let Err(err) = self.validate(board, grid, target, pending) {
            debug!(%err, "placement rejected");
            return Err(err);
        }

        board.place(target, pending);
        let outcome = PlacementOutcome::from(self.engine.resolve(board, grid, target));

        debug!(
            depth = outcome.steps.len(),
            points = outcome.points,
            final_tier = ?outcome.final_tier,
            "placement resolved"
        );
        Ok(outcome)
    }
}
