//! Evolution cascades.
//!
//! When a placed piece matches, the matched region is removed and the piece
//! evolves into the next tier. The evolved piece is probed again at the same
//! cell, and so on, until a level fails to match or evolution would pass the
//! maximum tier.
//!
//! ## Ordering
//!
//! The piece is committed to the board before every probe. The probe
//! excludes its origin, so committing first never lets the placed piece
//! count towards its own match.
//!
//! ## Termination
//!
//! Each step strictly increases the tier and the tier is capped, so a cascade
//! starting at tier `p` runs at most `max - p + 1` steps.

use hexx::Hex;
use tracing::{debug, trace};

use super::probe::{probe, MatchResult};
use crate::board::Board;
use crate::core::Tier;
use crate::grid::HexGrid;

/// Points per piece in a matched group, scaled by the evolved tier.
pub const POINTS_PER_PIECE: u64 = 10;

/// Points for a match that evolves into `evolved`, with `matched` pieces
/// removed besides the placed one.
#[must_use]
pub fn points_for(evolved: Tier, matched: usize) -> u64 {
    u64::from(evolved.raw()) * (matched as u64 + 1) * POINTS_PER_PIECE
}

/// One level of a cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeStep {
    /// Tier that matched.
    pub tier: Tier,
    /// Tier the placed piece evolved into, or `None` when it passed the
    /// maximum tier and was removed.
    pub evolved: Option<Tier>,
    /// Cells removed by this step, not counting the origin.
    pub removed: Vec<Hex>,
    /// Points awarded by this step.
    pub points: u64,
}

/// Every step triggered by one placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cascade {
    /// Cell the cascade evolved.
    pub origin: Hex,
    /// Tier the origin held when the cascade started.
    pub start_tier: Tier,
    /// Steps in order. Empty when the placement did not match.
    pub steps: Vec<CascadeStep>,
    /// Tier left at the origin, or `None` if the origin was cleared.
    pub final_tier: Option<Tier>,
}

impl Cascade {
    /// Total points over all steps.
    #[must_use]
    pub fn points(&self) -> u64 {
        self.steps.iter().map(|step| step.points).sum()
    }

    /// Whether the placement matched at all.
    #[must_use]
    pub fn matched(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Number of steps.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Every removed cell, in step order.
    pub fn removed(&self) -> impl Iterator<Item = Hex> + '_ {
        self.steps.iter().flat_map(|step| step.removed.iter().copied())
    }

    /// Whether evolution passed the maximum tier and cleared the origin.
    #[must_use]
    pub fn capped(&self) -> bool {
        self.final_tier.is_none()
    }
}

/// Match detection and cascade resolution for one tier range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchEngine {
    max_tier: Tier,
}

impl MatchEngine {
    /// Create an engine whose pieces evolve up to `max_tier`.
    #[must_use]
    pub fn new(max_tier: Tier) -> Self {
        Self { max_tier }
    }

    /// Highest tier a piece can evolve into.
    #[must_use]
    pub fn max_tier(&self) -> Tier {
        self.max_tier
    }

    /// Probe the region a piece of `tier` at `origin` would connect to.
    #[must_use]
    pub fn probe<G: HexGrid>(&self, origin: Hex, tier: Tier, board: &Board, grid: &G) -> MatchResult {
        probe(origin, tier, board, grid)
    }

    /// Whether a piece of `tier` at `origin` would match right away.
    #[must_use]
    pub fn would_match<G: HexGrid>(&self, origin: Hex, tier: Tier, board: &Board, grid: &G) -> bool {
        self.probe(origin, tier, board, grid).is_match()
    }

    /// Resolve one level: probe `tier` at `origin`, and on a match remove
    /// the region and evolve (or clear) the origin.
    ///
    /// Returns `None` when the level does not match; the board is untouched.
    pub fn step<G: HexGrid>(&self, board: &mut Board, grid: &G, origin: Hex, tier: Tier) -> Option<CascadeStep> {
        let result = self.probe(origin, tier, board, grid);
        if !result.is_match() {
            trace!(x = origin.x, y = origin.y, tier = tier.raw(), matched = result.len(), "no match");
            return None;
        }

        let matched = result.len();
        let removed = result.into_coordinates();
        for &hex in &removed {
            board.remove(hex);
        }

        let evolved = tier.next();
        if evolved > self.max_tier {
            board.remove(origin);
            debug!(
                x = origin.x,
                y = origin.y,
                tier = tier.raw(),
                matched,
                "evolution capped at maximum tier, origin cleared"
            );
            return Some(CascadeStep {
                tier,
                evolved: None,
                removed,
                points: 0,
            });
        }

        board.place(origin, evolved);
        let points = points_for(evolved, matched);
        debug!(
            x = origin.x,
            y = origin.y,
            tier = tier.raw(),
            evolved = evolved.raw(),
            matched,
            points,
            "cascade step"
        );
        Some(CascadeStep {
            tier,
            evolved: Some(evolved),
            removed,
            points,
        })
    }

    /// Run the cascade for the piece already committed at `origin`.
    ///
    /// Mutates `board`: matched regions are removed and the origin is
    /// evolved or cleared. An unoccupied origin yields an empty cascade.
    pub fn resolve<G: HexGrid>(&self, board: &mut Board, grid: &G, origin: Hex) -> Cascade {
        let Some(start_tier) = board.get(origin) else {
            return Cascade {
                origin,
                start_tier: Tier::default(),
                steps: Vec::new(),
                final_tier: None,
            };
        };

        let mut steps = Vec::new();
        let mut current = Some(start_tier);

        while let Some(tier) = current {
            let Some(step) = self.step(board, grid, origin, tier) else {
                break;
            };
            current = step.evolved;
            steps.push(step);
        }

        Cascade {
            origin,
            start_tier,
            steps,
            final_tier: current,
        }
    }

    /// Simulate placing `tier` at `origin` without touching `board`.
    ///
    /// Works on an O(1) persistent clone of the board.
    #[must_use]
    pub fn preview<G: HexGrid>(&self, board: &Board, grid: &G, origin: Hex, tier: Tier) -> Cascade {
        let mut scratch = board.clone();
        scratch.place(origin, tier);
        self.resolve(&mut scratch, grid, origin)
    }
}
