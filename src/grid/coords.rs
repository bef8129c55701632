//! Coordinate encoding, offset conversion and neighbor enumeration.
//!
//! ## Encoding
//!
//! Board keys pack the two 32-bit components of a coordinate into one `i64`:
//! high word `x`, low word `y`. The mapping is a bijection over all of
//! `i32 x i32`, so `decode(encode(h)) == h` everywhere.
//!
//! ```
//! use hex_merge::grid::{decode, encode};
//! use hexx::Hex;
//!
//! let hex = Hex::new(-3, 7);
//! assert_eq!(decode(encode(hex)), hex);
//! ```
//!
//! ## Offset layouts
//!
//! Offset coordinates store `(column, row)` in `Hex { x, y }`. Which rows
//! (pointy-top) or columns (flat-top) are shoved outward is chosen by
//! `OffsetParity`, and the neighbor table for a cell depends on the parity of
//! its own row or column.

use hexx::Hex;
use smallvec::SmallVec;

use crate::core::{CoordinateSystem, GridConfig, OffsetParity, Orientation, PuzzleError};

/// Neighbor list. Always six entries for hex grids.
pub type Neighbors = SmallVec<[Hex; 6]>;

/// Encode a coordinate as a board key.
#[must_use]
pub const fn encode(hex: Hex) -> i64 {
    (((hex.x as u32 as u64) << 32) | (hex.y as u32 as u64)) as i64
}

/// Decode a board key back into its coordinate.
#[must_use]
pub fn decode(key: i64) -> Hex {
    Hex::new((key >> 32) as i32, key as i32)
}

// Indexed by the parity of the cell's row (pointy) or column (flat); entries are (d_col, d_row).
const POINTY_ODD: [[(i32, i32); 6]; 2] = [
    [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)],
    [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)],
];
const POINTY_EVEN: [[(i32, i32); 6]; 2] = [
    [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (1, 1)],
    [(1, 0), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)],
];
const FLAT_ODD: [[(i32, i32); 6]; 2] = [
    [(1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (0, 1)],
    [(1, 1), (1, 0), (0, -1), (-1, 0), (-1, 1), (0, 1)],
];
const FLAT_EVEN: [[(i32, i32); 6]; 2] = [
    [(1, 1), (1, 0), (0, -1), (-1, 0), (-1, 1), (0, 1)],
    [(1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (0, 1)],
];

/// Neighbor enumeration for one coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborStrategy {
    /// Six fixed axial directions.
    Axial,
    /// Parity-dependent offset tables.
    Offset {
        orientation: Orientation,
        parity: OffsetParity,
    },
}

impl NeighborStrategy {
    /// Pick the strategy for a grid configuration.
    ///
    /// Fails for coordinate systems without a neighbor table.
    pub fn for_config(config: &GridConfig) -> Result<Self, PuzzleError> {
        match config.coordinate_system {
            CoordinateSystem::Axial => Ok(NeighborStrategy::Axial),
            CoordinateSystem::Offset => Ok(NeighborStrategy::Offset {
                orientation: config.orientation,
                parity: config.offset_parity,
            }),
            other => Err(PuzzleError::UnsupportedCoordinateSystem(other)),
        }
    }

    /// The six neighbors of `hex`, in a fixed direction order.
    #[must_use]
    pub fn neighbors(self, hex: Hex) -> Neighbors {
        match self {
            NeighborStrategy::Axial => hex.all_neighbors().into_iter().collect(),
            NeighborStrategy::Offset { orientation, parity } => {
                let table = match (orientation, parity) {
                    (Orientation::PointyTop, OffsetParity::Odd) => &POINTY_ODD,
                    (Orientation::PointyTop, OffsetParity::Even) => &POINTY_EVEN,
                    (Orientation::FlatTop, OffsetParity::Odd) => &FLAT_ODD,
                    (Orientation::FlatTop, OffsetParity::Even) => &FLAT_EVEN,
                };
                let shifted = match orientation {
                    Orientation::PointyTop => hex.y,
                    Orientation::FlatTop => hex.x,
                };
                table[(shifted & 1) as usize]
                    .iter()
                    .map(|&(dx, dy)| Hex::new(hex.x + dx, hex.y + dy))
                    .collect()
            }
        }
    }
}

/// Convert an axial coordinate to offset `(column, row)`.
#[must_use]
pub fn axial_to_offset(hex: Hex, orientation: Orientation, parity: OffsetParity) -> Hex {
    let (q, r) = (hex.x, hex.y);
    match orientation {
        Orientation::PointyTop => {
            let col = match parity {
                OffsetParity::Odd => q + (r - (r & 1)) / 2,
                OffsetParity::Even => q + (r + (r & 1)) / 2,
            };
            Hex::new(col, r)
        }
        Orientation::FlatTop => {
            let row = match parity {
                OffsetParity::Odd => r + (q - (q & 1)) / 2,
                OffsetParity::Even => r + (q + (q & 1)) / 2,
            };
            Hex::new(q, row)
        }
    }
}

/// Convert an offset `(column, row)` coordinate to axial.
#[must_use]
pub fn offset_to_axial(hex: Hex, orientation: Orientation, parity: OffsetParity) -> Hex {
    let (col, row) = (hex.x, hex.y);
    match orientation {
        Orientation::PointyTop => {
            let q = match parity {
                OffsetParity::Odd => col - (row - (row & 1)) / 2,
                OffsetParity::Even => col - (row + (row & 1)) / 2,
            };
            Hex::new(q, row)
        }
        Orientation::FlatTop => {
            let r = match parity {
                OffsetParity::Odd => row - (col - (col & 1)) / 2,
                OffsetParity::Even => row - (col + (col & 1)) / 2,
            };
            Hex::new(col, r)
        }
    }
}
