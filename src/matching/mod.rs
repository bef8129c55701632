//! Match detection and evolution cascades.
//!
//! - `probe`: flood fill over same-tier pieces around a cell
//! - `cascade`: remove, evolve and re-probe until the cell stops matching

pub mod cascade;
pub mod probe;

pub use cascade::{points_for, Cascade, CascadeStep, MatchEngine, POINTS_PER_PIECE};
pub use probe::{probe, MatchResult, REQUIRED_MATCH_COUNT};
