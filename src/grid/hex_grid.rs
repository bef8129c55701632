//! Grid membership and traversal.
//!
//! `HexGrid` is the seam between the rules engine and whatever geometry
//! the host uses. The engine only needs neighbors, membership and iteration;
//! board keys always come from `grid::encode`. `HexagonGrid` is the
//! configured implementation shipped with the crate.

use hexx::{shapes, Hex};
use rustc_hash::FxHashSet;

use super::coords::{self, NeighborStrategy, Neighbors};
use crate::core::{CoordinateSystem, GridConfig, GridShape, PuzzleError};

/// Grid geometry consumed by the rules engine.
///
/// ## Implementation Notes
///
/// - `neighbors` may return coordinates outside the grid; they are never occupied
/// - `for_each_coordinate` must visit every member once, in a stable order
pub trait HexGrid {
    /// Adjacent coordinates of `hex`.
    fn neighbors(&self, hex: Hex) -> Neighbors;

    /// Whether `hex` is a cell of this grid.
    fn contains(&self, hex: Hex) -> bool;

    /// Visit every cell until `f` returns `false`.
    fn for_each_coordinate<F: FnMut(Hex) -> bool>(&self, f: F)
    where
        Self: Sized;

    /// Number of cells.
    fn len(&self) -> usize;

    /// Whether the grid has no cells.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells, in iteration order.
    fn coordinates(&self) -> Vec<Hex>
    where
        Self: Sized,
    {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_coordinate(|hex| {
            out.push(hex);
            true
        });
        out
    }
}

/// Largest number of cells a configured grid may have.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Cell count of `shape`, or `None` if it does not fit in a `u64`.
fn cell_count(shape: GridShape) -> Option<u64> {
    match shape {
        GridShape::Hexagon { radius } => {
            let radius = u64::from(radius);
            radius
                .checked_mul(radius + 1)
                .and_then(|ring_cells| ring_cells.checked_mul(3))
                .map(|ring_cells| ring_cells + 1)
        }
        GridShape::Rectangle { columns, rows } => u64::from(columns).checked_mul(u64::from(rows)),
    }
}

/// Hex grid built from a `GridConfig`.
///
/// ```
/// use hex_merge::core::GridConfig;
/// use hex_merge::grid::{HexGrid, HexagonGrid};
/// use hexx::Hex;
///
/// let grid = HexagonGrid::from_config(&GridConfig::hexagon(1)).unwrap();
/// assert_eq!(grid.len(), 7);
/// assert!(grid.contains(Hex::ZERO));
/// assert!(!grid.contains(Hex::new(2, 0)));
/// ```
#[derive(Clone, Debug)]
pub struct HexagonGrid {
    config: GridConfig,
    strategy: NeighborStrategy,
    cells: Vec<Hex>,
    members: FxHashSet<Hex>,
}

impl HexagonGrid {
    /// Build the grid described by `config`.
    ///
    /// Fails with `UnsupportedCoordinateSystem` when no neighbor strategy
    /// exists for the configured coordinate system, and with `GridTooLarge`
    /// when the shape has more than `MAX_GRID_CELLS` cells.
    pub fn from_config(config: &GridConfig) -> Result<Self, PuzzleError> {
        let strategy = NeighborStrategy::for_config(config)?;
        let count = match cell_count(config.shape) {
            Some(count) if count <= MAX_GRID_CELLS => count,
            _ => return Err(PuzzleError::GridTooLarge(config.shape)),
        };
        let orientation = config.orientation;
        let parity = config.offset_parity;

        // The cell bound keeps every radius and side well inside `i32`.
        let cells: Vec<Hex> = match (config.shape, config.coordinate_system) {
            (GridShape::Hexagon { radius }, CoordinateSystem::Offset) => shapes::hexagon(Hex::ZERO, radius)
                .map(|hex| coords::axial_to_offset(hex, orientation, parity))
                .collect(),
            (GridShape::Hexagon { radius }, _) => shapes::hexagon(Hex::ZERO, radius).collect(),
            (GridShape::Rectangle { columns, rows }, system) => {
                let mut cells = Vec::with_capacity(count as usize);
                for row in 0..rows as i32 {
                    for col in 0..columns as i32 {
                        let offset = Hex::new(col, row);
                        cells.push(match system {
                            CoordinateSystem::Offset => offset,
                            _ => coords::offset_to_axial(offset, orientation, parity),
                        });
                    }
                }
                cells
            }
        };

        let members = cells.iter().copied().collect();

        Ok(Self {
            config: *config,
            strategy,
            cells,
            members,
        })
    }

    /// Configuration this grid was built from.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Neighbor strategy in use.
    #[must_use]
    pub fn strategy(&self) -> NeighborStrategy {
        self.strategy
    }
}

impl HexGrid for HexagonGrid {
    fn neighbors(&self, hex: Hex) -> Neighbors {
        self.strategy.neighbors(hex)
    }

    fn contains(&self, hex: Hex) -> bool {
        self.members.contains(&hex)
    }

    fn for_each_coordinate<F: FnMut(Hex) -> bool>(&self, mut f: F) {
        for &hex in &self.cells {
            if !f(hex) {
                break;
            }
        }
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OffsetParity, Orientation};

    #[test]
    fn test_hexagon_sizes() {
        for (radius, expected) in [(0, 1), (1, 7), (2, 19), (3, 37)] {
            let grid = HexagonGrid::from_config(&GridConfig::hexagon(radius)).unwrap();
            assert_eq!(grid.len(), expected);
        }
    }

    #[test]
    fn test_rectangle_offset_membership() {
        let grid = HexagonGrid::from_config(&GridConfig::rectangle(4, 3)).unwrap();

        assert_eq!(grid.len(), 12);
        assert!(grid.contains(Hex::new(0, 0)));
        assert!(grid.contains(Hex::new(3, 2)));
        assert!(!grid.contains(Hex::new(4, 0)));
        assert!(!grid.contains(Hex::new(0, -1)));
    }

    #[test]
    fn test_rectangle_axial_converts_cells() {
        let config = GridConfig::rectangle(3, 3).with_coordinate_system(CoordinateSystem::Axial);
        let grid = HexagonGrid::from_config(&config).unwrap();

        assert_eq!(grid.len(), 9);
        // Odd-r row 2 starts one column left in axial space.
        assert!(grid.contains(Hex::new(-1, 2)));
        assert!(!grid.contains(Hex::new(2, 2)));
    }

    #[test]
    fn test_offset_hexagon_has_same_adjacency_count() {
        let axial = HexagonGrid::from_config(&GridConfig::hexagon(2)).unwrap();
        let offset_config = GridConfig::hexagon(2)
            .with_coordinate_system(CoordinateSystem::Offset)
            .with_orientation(Orientation::FlatTop)
            .with_offset_parity(OffsetParity::Even);
        let offset = HexagonGrid::from_config(&offset_config).unwrap();

        let edges = |grid: &HexagonGrid| -> usize {
            grid.coordinates()
                .into_iter()
                .map(|hex| grid.neighbors(hex).into_iter().filter(|n| grid.contains(*n)).count())
                .sum()
        };

        assert_eq!(axial.len(), offset.len());
        assert_eq!(edges(&axial), edges(&offset));
    }

    #[test]
    fn test_for_each_stops_early() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(2)).unwrap();
        let mut visited = 0;
        grid.for_each_coordinate(|_| {
            visited += 1;
            visited < 5
        });
        assert_eq!(visited, 5);
    }

    #[test]
    fn test_coordinates_are_distinct() {
        let grid = HexagonGrid::from_config(&GridConfig::hexagon(3)).unwrap();
        let coordinates = grid.coordinates();
        let unique: FxHashSet<Hex> = coordinates.iter().copied().collect();
        assert_eq!(coordinates.len(), unique.len());
    }

    #[test]
    fn test_unsupported_system_aborts_setup() {
        let config = GridConfig::hexagon(2).with_coordinate_system(CoordinateSystem::Doubled);
        let err = HexagonGrid::from_config(&config).unwrap_err();
        assert_eq!(err, PuzzleError::UnsupportedCoordinateSystem(CoordinateSystem::Doubled));
    }

    #[test]
    fn test_oversized_shapes_abort_setup() {
        for config in [
            GridConfig::rectangle(u32::MAX, u32::MAX),
            GridConfig::rectangle(u32::MAX, 1),
            GridConfig::rectangle(1025, 1024),
            GridConfig::hexagon(u32::MAX),
            GridConfig::hexagon(600),
        ] {
            let err = HexagonGrid::from_config(&config).unwrap_err();
            assert_eq!(err, PuzzleError::GridTooLarge(config.shape));
            assert!(!err.is_recoverable());
        }
    }

    #[test]
    fn test_largest_rectangle_accepted() {
        let grid = HexagonGrid::from_config(&GridConfig::rectangle(1024, 1024)).unwrap();
        assert_eq!(grid.len() as u64, MAX_GRID_CELLS);
        assert!(grid.contains(Hex::new(1023, 1023)));
    }

    #[test]
    fn test_empty_rectangle() {
        let grid = HexagonGrid::from_config(&GridConfig::rectangle(0, 5)).unwrap();
        assert!(grid.is_empty());
    }
}
