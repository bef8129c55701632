//! Puzzle configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `GridConfig`: Coordinate system, orientation, parity and board shape
//! - `PieceSpawnRate`: Per-tier spawn weight curves (see `spawn`)
//! - `PuzzleConfig`: Combines all configuration
//!
//! All types derive `serde` traits so content can be loaded from any format
//! the host chooses. The engine owns no file format.

use serde::{Deserialize, Serialize};

use crate::spawn::PieceSpawnRate;

/// How grid coordinates are expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Axial `(q, r)` coordinates.
    #[default]
    Axial,
    /// Offset `(column, row)` coordinates; every other row or column is shifted.
    Offset,
    /// Doubled coordinates. Accepted by the schema, but no neighbor
    /// strategy exists for it.
    Doubled,
}

/// Hexagon orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Pointy side up; offset grids shift rows.
    #[default]
    PointyTop,
    /// Flat side up; offset grids shift columns.
    FlatTop,
}

/// Which rows (pointy-top) or columns (flat-top) are shifted in offset grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetParity {
    /// Odd rows/columns are shoved outward.
    #[default]
    Odd,
    /// Even rows/columns are shoved outward.
    Even,
}

/// Board outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridShape {
    /// Regular hexagon of cells around the origin. Radius 0 is a single cell.
    Hexagon { radius: u32 },
    /// `columns` x `rows` block in offset space, starting at `(0, 0)`.
    Rectangle { columns: u32, rows: u32 },
}

impl Default for GridShape {
    fn default() -> Self {
        GridShape::Hexagon { radius: 3 }
    }
}

/// Grid configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Coordinate system of every coordinate handed to or returned by the engine.
    pub coordinate_system: CoordinateSystem,

    /// Hexagon orientation. Selects the offset neighbor tables.
    pub orientation: Orientation,

    /// Offset parity. Ignored for axial grids.
    pub offset_parity: OffsetParity,

    /// Board outline.
    pub shape: GridShape,
}

impl GridConfig {
    /// Axial hexagon-shaped grid.
    #[must_use]
    pub fn hexagon(radius: u32) -> Self {
        Self {
            shape: GridShape::Hexagon { radius },
            ..Self::default()
        }
    }

    /// Offset rectangle-shaped grid.
    #[must_use]
    pub fn rectangle(columns: u32, rows: u32) -> Self {
        Self {
            coordinate_system: CoordinateSystem::Offset,
            shape: GridShape::Rectangle { columns, rows },
            ..Self::default()
        }
    }

    /// Set the coordinate system.
    #[must_use]
    pub fn with_coordinate_system(mut self, system: CoordinateSystem) -> Self {
        self.coordinate_system = system;
        self
    }

    /// Set the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the offset parity.
    #[must_use]
    pub fn with_offset_parity(mut self, parity: OffsetParity) -> Self {
        self.offset_parity = parity;
        self
    }
}

/// Complete puzzle configuration.
///
/// Hosts provide this already loaded; see `Puzzle::initialize`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Grid geometry.
    pub grid: GridConfig,

    /// Spawn curves per tier. Index `i` configures tier `i`; the last entry
    /// is the maximum tier.
    pub pieces: Vec<PieceSpawnRate>,

    /// Target piece count for the initial board (best effort).
    pub initial_piece_count: u32,

    /// Number of play spawns over which the play curves are traversed
    /// before the schedule wraps.
    pub spawn_rate_range: u32,

    /// Seed for the injected RNG.
    pub seed: u64,
}

impl PuzzleConfig {
    /// Create a configuration with no pieces.
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            pieces: Vec::new(),
            initial_piece_count: 0,
            spawn_rate_range: 1,
            seed: 0,
        }
    }

    /// Add the spawn rates of the next tier.
    #[must_use]
    pub fn with_piece(mut self, piece: PieceSpawnRate) -> Self {
        self.pieces.push(piece);
        self
    }

    /// Set the initial piece count.
    #[must_use]
    pub fn with_initial_piece_count(mut self, count: u32) -> Self {
        self.initial_piece_count = count;
        self
    }

    /// Set the play-spawn schedule range.
    #[must_use]
    pub fn with_spawn_rate_range(mut self, range: u32) -> Self {
        self.spawn_rate_range = range;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
