//! Connected-region search.
//!
//! A probe collects every piece of exactly `tier` that is connected to one
//! of `origin`'s neighbors through other pieces of that tier. The origin is
//! marked visited before the search starts, so it is never part of its own
//! result, whether or not it is already on the board.
//!
//! The search uses an explicit stack and a visited set of encoded keys, so
//! every cell is expanded at most once and region size never grows the call
//! stack.

use hexx::Hex;
use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::core::Tier;
use crate::grid::{encode, HexGrid};

/// Pieces needed for a match, counting the placed piece itself.
pub const REQUIRED_MATCH_COUNT: usize = 3;

/// Connected pieces found by one probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    tier: Tier,
    coordinates: Vec<Hex>,
}

impl MatchResult {
    /// Tier that was probed.
    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Matched cells, distinct, in discovery order.
    #[must_use]
    pub fn coordinates(&self) -> &[Hex] {
        &self.coordinates
    }

    /// Consume the result, keeping the matched cells.
    #[must_use]
    pub fn into_coordinates(self) -> Vec<Hex> {
        self.coordinates
    }

    /// Number of matched cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    #[must_use]
    pub fn contains(&self, hex: Hex) -> bool {
        self.coordinates.contains(&hex)
    }

    /// Whether the placed piece plus this region reaches `REQUIRED_MATCH_COUNT`.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.coordinates.len() + 1 >= REQUIRED_MATCH_COUNT
    }
}

/// Find the region of `tier` pieces reachable from `origin`'s neighbors.
pub fn probe<G: HexGrid>(origin: Hex, tier: Tier, board: &Board, grid: &G) -> MatchResult {
    let mut visited: FxHashSet<i64> = FxHashSet::default();
    visited.insert(encode(origin));

    let mut stack: Vec<Hex> = grid.neighbors(origin).into_iter().collect();
    let mut coordinates = Vec::new();

    while let Some(hex) = stack.pop() {
        let key = encode(hex);
        if !visited.insert(key) {
            continue;
        }
        if board.get_key(key) != Some(tier) {
            continue;
        }

        coordinates.push(hex);
        stack.extend(grid.neighbors(hex));
    }

    MatchResult { tier, coordinates }
}
