//! Puzzle session.
//!
//! `Puzzle` owns everything one play session needs: the grid, the board,
//! the spawn table, the RNG streams and the running score. Hosts drive it
//! with `place` and read it back through snapshots.
//!
//! ## Usage
//!
//! ```
//! use hex_merge::core::{GridConfig, PuzzleConfig};
//! use hex_merge::grid::HexGrid;
//! use hex_merge::puzzle::Puzzle;
//! use hex_merge::spawn::{PieceSpawnRate, SpawnCurve};
//!
//! let config = PuzzleConfig::new(GridConfig::hexagon(2))
//!     .with_piece(PieceSpawnRate::uniform(SpawnCurve::constant(1.0)))
//!     .with_piece(PieceSpawnRate::evolution_only())
//!     .with_initial_piece_count(4)
//!     .with_seed(7);
//!
//! let mut puzzle = Puzzle::initialize(&config).unwrap();
//! let target = puzzle
//!     .grid()
//!     .coordinates()
//!     .into_iter()
//!     .find(|hex| puzzle.can_place(*hex))
//!     .unwrap();
//!
//! let outcome = puzzle.place(target).unwrap();
//! assert_eq!(puzzle.score(), outcome.points);
//! assert_eq!(puzzle.moves(), 1);
//! ```

use hexx::Hex;
use tracing::debug;

use super::initializer::{BoardInitializer, PopulateReport};
use super::placement::{PlacementOrchestrator, PlacementOutcome};
use crate::board::Board;
use crate::core::{PuzzleConfig, PuzzleError, PuzzleRng, PuzzleRngState, Tier};
use crate::grid::{HexGrid, HexagonGrid};
use crate::matching::MatchEngine;
use crate::spawn::{SpawnMode, SpawnRateTable, SpawnSchedule};

const SEEDING_CONTEXT: &str = "seeding";
const SPAWNS_CONTEXT: &str = "spawns";

/// One play session on one grid.
#[derive(Clone, Debug)]
pub struct Puzzle<G: HexGrid = HexagonGrid> {
    grid: G,
    board: Board,
    spawn_table: SpawnRateTable,
    orchestrator: PlacementOrchestrator,
    schedule: SpawnSchedule,
    rng: PuzzleRng,
    pending: Tier,
    score: u64,
    moves: u32,
    populated: PopulateReport,
}

impl Puzzle<HexagonGrid> {
    /// Build the grid from `config.grid`, seed the board and draw the
    /// first pending piece.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCoordinateSystem` if the grid has no neighbor strategy
    /// - `EmptySpawnTable` if `config.pieces` is empty
    /// - `ZeroSpawnRange` if `config.spawn_rate_range` is 0
    pub fn initialize(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        let grid = HexagonGrid::from_config(&config.grid)?;
        Self::with_grid(grid, config)
    }
}

impl<G: HexGrid> Puzzle<G> {
    /// Start a session on a host-provided grid. `config.grid` is ignored.
    pub fn with_grid(grid: G, config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        let spawn_table = SpawnRateTable::new(config.pieces.clone())?;
        let schedule = SpawnSchedule::new(config.spawn_rate_range)?;
        let engine = MatchEngine::new(spawn_table.max_tier());

        let root = PuzzleRng::new(config.seed);
        let mut seeding = root.for_context(SEEDING_CONTEXT);

        let mut board = Board::new();
        let populated = BoardInitializer::new(&spawn_table, engine).populate(
            &mut board,
            &grid,
            config.initial_piece_count,
            &mut seeding,
        );

        let mut puzzle = Self {
            grid,
            board,
            spawn_table,
            orchestrator: PlacementOrchestrator::new(engine),
            schedule,
            rng: root.for_context(SPAWNS_CONTEXT),
            pending: Tier::default(),
            score: 0,
            moves: 0,
            populated,
        };
        puzzle.pending = puzzle.draw_pending();

        debug!(
            cells = puzzle.grid.len(),
            tiers = puzzle.spawn_table.tier_count(),
            pieces = puzzle.board.len(),
            pending = puzzle.pending.raw(),
            seed = config.seed,
            "puzzle initialized"
        );
        Ok(puzzle)
    }

    /// Place the pending piece at `target`.
    ///
    /// On success the outcome's points are added to the score and the next
    /// pending piece is drawn. On error nothing changes, including the
    /// pending piece.
    pub fn place(&mut self, target: Hex) -> Result<PlacementOutcome, PuzzleError> {
        let outcome = self
            .orchestrator
            .place(&mut self.board, &self.grid, target, self.pending)?;

        self.score += outcome.points;
        self.moves += 1;
        self.pending = self.draw_pending();
        Ok(outcome)
    }

    /// Whether the pending piece can be placed at `target`.
    #[must_use]
    pub fn can_place(&self, target: Hex) -> bool {
        self.orchestrator
            .validate(&self.board, &self.grid, target, self.pending)
            .is_ok()
    }

    /// What placing the pending piece at `target` would do.
    ///
    /// Returns `None` for targets `place` would reject.
    #[must_use]
    pub fn preview(&self, target: Hex) -> Option<PlacementOutcome> {
        if !self.can_place(target) {
            return None;
        }
        let cascade = self
            .orchestrator
            .engine()
            .preview(&self.board, &self.grid, target, self.pending);
        Some(cascade.into())
    }

    /// Draw a tier from the session's spawn stream.
    ///
    /// `t` is clamped to `[0, 1]`. Does not change the pending piece.
    pub fn next_spawn(&mut self, mode: SpawnMode, t: f32) -> Tier {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.spawn_table.select(mode, t, &mut self.rng)
    }

    fn draw_pending(&mut self) -> Tier {
        let t = self.schedule.advance();
        self.spawn_table.select(SpawnMode::Play, t, &mut self.rng)
    }

    /// Tier that the next `place` will put down.
    #[must_use]
    pub fn pending(&self) -> Tier {
        self.pending
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Accepted placements so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Occupied cells, for view refresh. Order is unspecified.
    pub fn pieces(&self) -> impl Iterator<Item = (Hex, Tier)> + '_ {
        self.board.occupied()
    }

    /// Whether every grid cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.board.len() >= self.grid.len()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn grid(&self) -> &G {
        &self.grid
    }

    #[must_use]
    pub fn spawn_table(&self) -> &SpawnRateTable {
        &self.spawn_table
    }

    /// Play-spawn schedule position.
    #[must_use]
    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    /// What board seeding did at initialization.
    #[must_use]
    pub fn populate_report(&self) -> PopulateReport {
        self.populated
    }

    /// State of the play-spawn stream, for replays.
    #[must_use]
    pub fn rng_state(&self) -> PuzzleRngState {
        self.rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CoordinateSystem, GridConfig, InvalidTargetReason};
    use crate::spawn::{PieceSpawnRate, SpawnCurve};

    /// Three tiers, only tier 0 spawns.
    fn config() -> PuzzleConfig {
        PuzzleConfig::new(GridConfig::hexagon(1))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::constant(1.0)))
            .with_piece(PieceSpawnRate::evolution_only())
            .with_piece(PieceSpawnRate::evolution_only())
    }

    #[test]
    fn test_initialize_empty_board() {
        let puzzle = Puzzle::initialize(&config()).unwrap();

        assert!(puzzle.board().is_empty());
        assert_eq!(puzzle.pending(), Tier::new(0));
        assert_eq!(puzzle.score(), 0);
        assert_eq!(puzzle.moves(), 0);
        assert_eq!(puzzle.grid().len(), 7);
        assert_eq!(puzzle.schedule().index(), 0);
    }

    #[test]
    fn test_initialize_errors() {
        let doubled = PuzzleConfig {
            grid: GridConfig::hexagon(1).with_coordinate_system(CoordinateSystem::Doubled),
            ..config()
        };
        assert_eq!(
            Puzzle::initialize(&doubled).unwrap_err(),
            PuzzleError::UnsupportedCoordinateSystem(CoordinateSystem::Doubled)
        );

        let empty = PuzzleConfig::new(GridConfig::hexagon(1));
        assert_eq!(Puzzle::initialize(&empty).unwrap_err(), PuzzleError::EmptySpawnTable);

        let zero_range = config().with_spawn_rate_range(0);
        assert_eq!(Puzzle::initialize(&zero_range).unwrap_err(), PuzzleError::ZeroSpawnRange);
    }

    #[test]
    fn test_place_accumulates_score_and_moves() {
        let mut puzzle = Puzzle::initialize(&config()).unwrap();

        assert_eq!(puzzle.place(Hex::new(1, 0)).unwrap().points, 0);
        assert_eq!(puzzle.place(Hex::new(0, 1)).unwrap().points, 0);
        let outcome = puzzle.place(Hex::ZERO).unwrap();

        assert_eq!(outcome.points, 30);
        assert_eq!(outcome.final_tier, Some(Tier::new(1)));
        assert_eq!(puzzle.score(), 30);
        assert_eq!(puzzle.moves(), 3);
        assert_eq!(puzzle.pieces().collect::<Vec<_>>(), vec![(Hex::ZERO, Tier::new(1))]);
    }

    #[test]
    fn test_rejected_place_changes_nothing() {
        let mut puzzle = Puzzle::initialize(&config()).unwrap();
        puzzle.place(Hex::ZERO).unwrap();
        let rng_before = puzzle.rng_state();

        let err = puzzle.place(Hex::ZERO).unwrap_err();

        assert_eq!(
            err,
            PuzzleError::InvalidTarget {
                target: Hex::ZERO,
                reason: InvalidTargetReason::Occupied(Tier::new(0)),
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(puzzle.moves(), 1);
        assert_eq!(puzzle.rng_state(), rng_before);
    }

    #[test]
    fn test_can_place() {
        let mut puzzle = Puzzle::initialize(&config()).unwrap();
        puzzle.place(Hex::new(1, 0)).unwrap();

        assert!(puzzle.can_place(Hex::ZERO));
        assert!(!puzzle.can_place(Hex::new(1, 0)));
        assert!(!puzzle.can_place(Hex::new(2, 0)));
    }

    #[test]
    fn test_preview_matches_place() {
        let mut puzzle = Puzzle::initialize(&config()).unwrap();
        puzzle.place(Hex::new(1, 0)).unwrap();
        puzzle.place(Hex::new(0, 1)).unwrap();

        let preview = puzzle.preview(Hex::ZERO).unwrap();
        assert_eq!(puzzle.board().len(), 2);
        assert_eq!(puzzle.preview(Hex::new(1, 0)), None);

        let outcome = puzzle.place(Hex::ZERO).unwrap();
        assert_eq!(preview, outcome);
    }

    #[test]
    fn test_capped_placement_clears_target() {
        let config = PuzzleConfig::new(GridConfig::hexagon(1))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::constant(1.0)));
        let mut puzzle = Puzzle::initialize(&config).unwrap();

        puzzle.place(Hex::new(1, 0)).unwrap();
        puzzle.place(Hex::new(0, 1)).unwrap();
        let outcome = puzzle.place(Hex::ZERO).unwrap();

        assert!(outcome.capped());
        assert_eq!(outcome.points, 0);
        assert!(puzzle.board().is_empty());
        assert_eq!(puzzle.score(), 0);
    }

    #[test]
    fn test_next_spawn_clamps_time() {
        let config = PuzzleConfig::new(GridConfig::hexagon(1))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::linear(1.0, 0.0)))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::linear(0.0, 1.0)));
        let mut puzzle = Puzzle::initialize(&config).unwrap();

        for _ in 0..20 {
            assert_eq!(puzzle.next_spawn(SpawnMode::Play, 5.0), Tier::new(1));
            assert_eq!(puzzle.next_spawn(SpawnMode::Initial, -3.0), Tier::new(0));
        }
    }

    #[test]
    fn test_next_spawn_nan_time_reads_start() {
        let config = PuzzleConfig::new(GridConfig::hexagon(1))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::linear(1.0, 0.0)))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::linear(0.0, 1.0)));
        let mut puzzle = Puzzle::initialize(&config).unwrap();

        for _ in 0..20 {
            assert_eq!(puzzle.next_spawn(SpawnMode::Play, f32::NAN), Tier::new(0));
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let config = PuzzleConfig::new(GridConfig::hexagon(3))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::constant(1.0)))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::constant(1.0)))
            .with_piece(PieceSpawnRate::evolution_only())
            .with_initial_piece_count(12)
            .with_spawn_rate_range(10)
            .with_seed(99);

        let a = Puzzle::initialize(&config).unwrap();
        let b = Puzzle::initialize(&config).unwrap();

        assert_eq!(a.board().snapshot(), b.board().snapshot());
        assert_eq!(a.pending(), b.pending());
        assert_eq!(a.populate_report(), b.populate_report());
        assert_eq!(a.schedule().index(), 1);
    }

    #[test]
    fn test_is_full() {
        let config = PuzzleConfig::new(GridConfig::hexagon(0))
            .with_piece(PieceSpawnRate::uniform(SpawnCurve::constant(1.0)))
            .with_piece(PieceSpawnRate::evolution_only());
        let mut puzzle = Puzzle::initialize(&config).unwrap();

        assert!(!puzzle.is_full());
        puzzle.place(Hex::ZERO).unwrap();
        assert!(puzzle.is_full());
    }
}
