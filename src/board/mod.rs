//! Board state: which cells hold which tier.

pub mod pieces;

pub use pieces::Board;
