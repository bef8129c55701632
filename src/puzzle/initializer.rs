//! Initial board seeding.
//!
//! For each of `count` spawn attempts, draw a tier from the initial curves at
//! `t = i / count`, then sample free cells without replacement until one is
//! found where that tier would not match. If no free cell works, the attempt
//! is skipped: `count` is an upper bound, not a guarantee.
//!
//! Since every accepted cell fails the match threshold, no seeded board
//! starts with a region that would already resolve.

use hexx::Hex;
use tracing::{debug, trace};

use crate::board::Board;
use crate::core::{PuzzleRng, Tier};
use crate::grid::HexGrid;
use crate::matching::MatchEngine;
use crate::spawn::{SpawnMode, SpawnRateTable};

/// What one `populate` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Spawn attempts requested.
    pub requested: u32,
    /// Pieces placed.
    pub placed: u32,
    /// Attempts skipped because every free cell would match.
    pub skipped: u32,
}

/// Seeds a board without pre-formed matches.
#[derive(Clone, Copy, Debug)]
pub struct BoardInitializer<'a> {
    table: &'a SpawnRateTable,
    engine: MatchEngine,
}

impl<'a> BoardInitializer<'a> {
    #[must_use]
    pub fn new(table: &'a SpawnRateTable, engine: MatchEngine) -> Self {
        Self { table, engine }
    }

    /// Place up to `count` pieces on the free cells of `grid`.
    ///
    /// Stops early once every cell is occupied.
    pub fn populate<G: HexGrid>(&self, board: &mut Board, grid: &G, count: u32, rng: &mut PuzzleRng) -> PopulateReport {
        let mut available: Vec<Hex> = grid
            .coordinates()
            .into_iter()
            .filter(|hex| !board.is_occupied(*hex))
            .collect();

        let mut report = PopulateReport {
            requested: count,
            ..PopulateReport::default()
        };

        for i in 0..count {
            if available.is_empty() {
                break;
            }

            let t = i as f32 / count as f32;
            let tier = self.table.select(SpawnMode::Initial, t, rng);

            match self.pick_cell(board, grid, &available, tier, rng) {
                Some(index) => {
                    let hex = available.swap_remove(index);
                    board.place(hex, tier);
                    report.placed += 1;
                    trace!(x = hex.x, y = hex.y, tier = tier.raw(), "seeded piece");
                }
                None => {
                    report.skipped += 1;
                    trace!(attempt = i, tier = tier.raw(), "no free cell avoids a match, skipping");
                }
            }
        }

        debug!(
            requested = report.requested,
            placed = report.placed,
            skipped = report.skipped,
            "board populated"
        );
        report
    }

    /// Index into `available` of a random cell where `tier` would not match.
    fn pick_cell<G: HexGrid>(
        &self,
        board: &Board,
        grid: &G,
        available: &[Hex],
        tier: Tier,
        rng: &mut PuzzleRng,
    ) -> Option<usize> {
        let mut candidates: Vec<usize> = (0..available.len()).collect();

        while !candidates.is_empty() {
            let pick = rng.gen_range_usize(0..candidates.len());
            let index = candidates.swap_remove(pick);
            if !self.engine.would_match(available[index], tier, board, grid) {
                return Some(index);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridConfig;
    use crate::grid::HexagonGrid;
    use crate::spawn::{PieceSpawnRate, SpawnCurve};

    fn single_tier_table() -> SpawnRateTable {
        SpawnRateTable::new(vec![
            PieceSpawnRate::uniform(SpawnCurve::constant(1.0)),
            PieceSpawnRate::evolution_only(),
        ])
        .unwrap()
    }

    #[test]
    fn test_populate_places_requested_count() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(3)).unwrap();
        let table = SpawnRateTable::new(vec![
            PieceSpawnRate::uniform(SpawnCurve::constant(1.0)),
            PieceSpawnRate::uniform(SpawnCurve::constant(1.0)),
            PieceSpawnRate::uniform(SpawnCurve::constant(1.0)),
        ])
        .unwrap();
        let initializer = BoardInitializer::new(&table, MatchEngine::new(table.max_tier()));
        let mut board = Board::new();
        let mut rng = PuzzleRng::new(42);

        let report = initializer.populate(&mut board, &grid, 8, &mut rng);

        assert_eq!(report.requested, 8);
        assert_eq!(report.placed + report.skipped, 8);
        assert_eq!(board.len(), report.placed as usize);
        assert!(report.placed >= 1);
    }

    #[test]
    fn test_zero_count_places_nothing() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(2)).unwrap();
        let table = single_tier_table();
        let initializer = BoardInitializer::new(&table, MatchEngine::new(table.max_tier()));
        let mut board = Board::new();
        let mut rng = PuzzleRng::new(1);

        let report = initializer.populate(&mut board, &grid, 0, &mut rng);

        assert_eq!(report, PopulateReport::default());
        assert!(board.is_empty());
    }

    #[test]
    fn test_count_larger_than_grid_stops_when_full_or_blocked() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(1)).unwrap();
        let table = single_tier_table();
        let initializer = BoardInitializer::new(&table, MatchEngine::new(table.max_tier()));
        let mut board = Board::new();
        let mut rng = PuzzleRng::new(3);

        let report = initializer.populate(&mut board, &grid, 50, &mut rng);

        assert!(board.len() <= grid.len());
        assert_eq!(board.len(), report.placed as usize);
        // Single tier: cells fill up until every free cell would match.
        assert!(report.skipped > 0);
    }

    #[test]
    fn test_seeded_board_has_no_ready_matches() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(3)).unwrap();
        let table = single_tier_table();
        let engine = MatchEngine::new(table.max_tier());
        let initializer = BoardInitializer::new(&table, engine);
        let mut board = Board::new();
        let mut rng = PuzzleRng::new(77);

        initializer.populate(&mut board, &grid, 30, &mut rng);

        for (hex, tier) in board.snapshot() {
            assert!(!engine.would_match(hex, tier, &board, &grid), "{:?} already matches", hex);
        }
    }

    #[test]
    fn test_populate_is_deterministic() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(3)).unwrap();
        let table = single_tier_table();
        let initializer = BoardInitializer::new(&table, MatchEngine::new(table.max_tier()));

        let mut board_a = Board::new();
        let mut board_b = Board::new();
        initializer.populate(&mut board_a, &grid, 15, &mut PuzzleRng::new(5));
        initializer.populate(&mut board_b, &grid, 15, &mut PuzzleRng::new(5));

        assert_eq!(board_a.snapshot(), board_b.snapshot());
    }

    #[test]
    fn test_skips_occupied_cells() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(1)).unwrap();
        let table = single_tier_table();
        let initializer = BoardInitializer::new(&table, MatchEngine::new(table.max_tier()));
        let mut board = Board::new();
        board.place(Hex::ZERO, Tier::new(1));
        let mut rng = PuzzleRng::new(8);

        initializer.populate(&mut board, &grid, 3, &mut rng);

        assert_eq!(board.get(Hex::ZERO), Some(Tier::new(1)));
    }
}
