//! Piece spawning: per-tier weight curves and weighted tier selection.
//!
//! Each tier carries two curves over normalized time, one for seeding the
//! initial board and one for pending pieces during play.

pub mod curve;
pub mod schedule;
pub mod table;

pub use curve::{CurveKey, PieceSpawnRate, SpawnCurve, SpawnMode};
pub use schedule::SpawnSchedule;
pub use table::{SpawnRateTable, TierWeights};
