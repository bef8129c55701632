//! Hex grid geometry.
//!
//! Coordinates are `hexx::Hex` values interpreted in the configured
//! coordinate system. The rules engine talks to geometry only through the
//! `HexGrid` trait.

pub mod coords;
pub mod hex_grid;

pub use coords::{axial_to_offset, decode, encode, offset_to_axial, NeighborStrategy, Neighbors};
pub use hex_grid::{HexGrid, HexagonGrid, MAX_GRID_CELLS};
