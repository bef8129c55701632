//! Piece placement state.
//!
//! The `Board` maps encoded coordinates to tiers. It holds no geometry and
//! no randomness: callers validate grid membership before placing.
//!
//! ## Usage
//!
//! ```
//! use hex_merge::board::Board;
//! use hex_merge::core::Tier;
//! use hexx::Hex;
//!
//! let mut board = Board::new();
//! board.place(Hex::new(1, 0), Tier::new(2));
//!
//! assert_eq!(board.get(Hex::new(1, 0)), Some(Tier::new(2)));
//! assert_eq!(board.remove(Hex::new(1, 0)), Some(Tier::new(2)));
//! assert!(board.is_empty());
//! ```

use std::hash::BuildHasherDefault;

use hexx::Hex;
use rustc_hash::FxHasher;

use crate::core::Tier;
use crate::grid::{decode, encode};

type PieceMap = im::HashMap<i64, Tier, BuildHasherDefault<FxHasher>>;

/// Occupied cells and their tiers.
///
/// Uses an `im` persistent map, so cloning a board to simulate a
/// placement is O(1).
#[derive(Clone, Debug, Default)]
pub struct Board {
    pieces: PieceMap,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `tier` at `hex`, returning the tier it replaced.
    pub fn place(&mut self, hex: Hex, tier: Tier) -> Option<Tier> {
        self.pieces.insert(encode(hex), tier)
    }

    /// Clear `hex`, returning the tier that was there.
    pub fn remove(&mut self, hex: Hex) -> Option<Tier> {
        self.pieces.remove(&encode(hex))
    }

    /// Tier at `hex`, if occupied.
    #[must_use]
    pub fn get(&self, hex: Hex) -> Option<Tier> {
        self.get_key(encode(hex))
    }

    /// Tier stored under an encoded key.
    #[must_use]
    pub fn get_key(&self, key: i64) -> Option<Tier> {
        self.pieces.get(&key).copied()
    }

    /// Check if `hex` holds a piece.
    #[must_use]
    pub fn is_occupied(&self, hex: Hex) -> bool {
        self.pieces.contains_key(&encode(hex))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check if no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Remove every piece.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Iterate occupied cells. Order is not meaningful.
    pub fn occupied(&self) -> impl Iterator<Item = (Hex, Tier)> + '_ {
        self.pieces.iter().map(|(&key, &tier)| (decode(key), tier))
    }

    /// Occupied cells sorted by encoded key, for view refresh and comparisons.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Hex, Tier)> {
        let mut entries: Vec<(i64, Tier)> = self.pieces.iter().map(|(&key, &tier)| (key, tier)).collect();
        entries.sort_unstable_by_key(|&(key, _)| key);
        entries.into_iter().map(|(key, tier)| (decode(key), tier)).collect()
    }

    /// Number of pieces at `tier`.
    #[must_use]
    pub fn count_tier(&self, tier: Tier) -> usize {
        self.pieces.values().filter(|&&t| t == tier).count()
    }
}
