//! # hex-merge
//!
//! Rules core for a hex-grid merge puzzle: place pieces, match groups of
//! three or more connected pieces of the same tier, and evolve the placed
//! piece through cascades.
//!
//! ## Design Principles
//!
//! 1. **Geometry-Agnostic**: The rules only see the `HexGrid` trait.
//!    Axial and offset grids are configured, not hardcoded.
//!
//! 2. **Deterministic**: Every random draw goes through an injected,
//!    seedable `PuzzleRng`. Same config and seed, same session.
//!
//! 3. **Configuration Over Convention**: Tiers, spawn curves and grid
//!    shape come from `PuzzleConfig`, supplied already loaded by the host.
//!
//! ## Architecture
//!
//! - **Commit first, probe second**: A placed piece is on the board before
//!   any match probe runs. Probes exclude their origin.
//!
//! - **Persistent Data Structures**: O(1) board clones via `im-rs`, used
//!   for placement previews.
//!
//! - **Explicit work lists**: Flood fill and cascades use loops over
//!   explicit stacks, never recursion.
//!
//! ## Modules
//!
//! - `core`: Tiers, configuration, errors, RNG
//! - `grid`: Coordinate encoding, neighbor strategies, `HexGrid`
//! - `board`: Occupied cells and their tiers
//! - `spawn`: Spawn curves, weighted tier selection, play-spawn schedule
//! - `matching`: Region probes and evolution cascades
//! - `puzzle`: Board seeding, placement protocol, session facade

pub mod core;
pub mod grid;
pub mod board;
pub mod spawn;
pub mod matching;
pub mod puzzle;

// Re-export commonly used types
pub use crate::core::{
    Tier,
    PuzzleRng, PuzzleRngState,
    CoordinateSystem, Orientation, OffsetParity, GridShape, GridConfig, PuzzleConfig,
    PuzzleError, InvalidTargetReason,
};

pub use crate::grid::{HexGrid, HexagonGrid, NeighborStrategy};

pub use crate::board::Board;

pub use crate::spawn::{CurveKey, SpawnCurve, SpawnMode, PieceSpawnRate, SpawnRateTable, SpawnSchedule};

pub use crate::matching::{
    MatchEngine, MatchResult, Cascade, CascadeStep,
    REQUIRED_MATCH_COUNT, POINTS_PER_PIECE,
};

pub use crate::puzzle::{
    BoardInitializer, PopulateReport,
    PlacementOrchestrator, PlacementOutcome,
    Puzzle,
};
