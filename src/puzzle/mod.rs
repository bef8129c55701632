//! Session-level flow: seeding the board, placing pieces, and the
//! `Puzzle` facade that ties them to one grid and one RNG.

pub mod initializer;
pub mod placement;
pub mod session;

pub use initializer::{BoardInitializer, PopulateReport};
pub use placement::{PlacementOrchestrator, PlacementOutcome};
pub use session::Puzzle;
